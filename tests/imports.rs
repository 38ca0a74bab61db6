use std::fs;

use madola::{EvaluationResult, config::InterpreterConfig, error::ErrorKind, evaluate_with_config};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn library(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, source) in files {
        fs::write(dir.path().join(name), source).unwrap();
    }
    dir
}

fn run_with(dir: &TempDir, body: &str) -> EvaluationResult {
    let config = InterpreterConfig::default().with_import_path(dir.path());
    evaluate_with_config(&format!("@version 0.01\n{body}"), config)
}

const GEOMETRY: &str = "@version 0.01
area(w, h) := w * h;
perimeter(w, h) := 2 * (w + h);
clamp_sign(x) := piecewise { (-1, x < 0), (1, otherwise) };
print(\"module output is discarded\");
scale := 10;
";

#[test]
fn selected_functions_are_imported() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);
    let result = run_with(&dir, "from madola_test_geometry import area;\nprint(area(2, 3));");
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.outputs, vec!["6"]);
}

#[test]
fn unselected_functions_and_module_variables_stay_behind() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);
    let result = run_with(&dir, "from madola_test_geometry import area;\nprint(perimeter(1, 1));");
    assert_eq!(result.error_kind, Some(ErrorKind::UndefinedFunction));

    let result = run_with(&dir, "import madola_test_geometry;\nprint(scale);");
    assert_eq!(result.error_kind, Some(ErrorKind::UndefinedVariable));
}

#[test]
fn aliases_and_piecewise_functions() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);
    let result = run_with(&dir,
                          "from madola_test_geometry import perimeter as p, clamp_sign;\nprint(p(1, 2));\nprint(perimeter(1, 2));\nprint(clamp_sign(-4));");
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.outputs, vec!["6", "6", "-1"]);
}

#[test]
fn whole_module_import_brings_every_function() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);
    let result = run_with(&dir,
                          "import \"madola_test_geometry.mda\";\nprint(area(2, 2) + perimeter(2, 2));\nprint(clamp_sign(3));");
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.outputs, vec!["12", "1"]);
}

#[test]
fn imported_functions_run_with_unit_values() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);
    let result = run_with(&dir, "from madola_test_geometry import area;\nprint(area(2 m, 4 m));");
    assert_eq!(result.outputs, vec!["8 m^2"]);
}

#[test]
fn missing_module_and_missing_function() {
    let dir = library(&[("madola_test_geometry.mda", GEOMETRY)]);

    let result = run_with(&dir, "from madola_test_nowhere import f;");
    assert_eq!(result.error_kind, Some(ErrorKind::ImportFailure));
    let message = result.error.unwrap_or_default();
    assert!(message.starts_with("Error on line 2: Cannot find module 'madola_test_nowhere.mda'"),
            "{message}");

    let result = run_with(&dir, "from madola_test_geometry import volume;");
    assert_eq!(result.error.as_deref(),
               Some("Error on line 2: Function 'volume' not found in module 'madola_test_geometry.mda'"));
}

#[test]
fn module_errors_are_reported_as_import_failures() {
    let dir = library(&[("madola_test_broken.mda", "@version 0.01\nx := 1 / 0;\n"),
                        ("madola_test_unversioned.mda", "f(x) := x;\n")]);

    let result = run_with(&dir, "import madola_test_broken;");
    assert_eq!(result.error_kind, Some(ErrorKind::ImportFailure));
    assert_eq!(result.error.as_deref(),
               Some("Error on line 2: Failed to evaluate imported file 'madola_test_broken.mda': Error on line 2: Division by zero"));

    let result = run_with(&dir, "import madola_test_unversioned;");
    assert_eq!(result.error_kind, Some(ErrorKind::ImportFailure));
}

#[test]
fn only_mda_modules_are_imported() {
    let dir = library(&[]);
    let result = run_with(&dir, "import \"native.wasm\";");
    assert_eq!(result.error_kind, Some(ErrorKind::ImportFailure));
}

#[test]
fn cyclic_imports_stop_at_the_call_depth_limit() {
    let dir = library(&[("madola_test_ping.mda", "@version 0.01\nimport madola_test_pong;\nping() := 1;\n"),
                        ("madola_test_pong.mda", "@version 0.01\nimport madola_test_ping;\npong() := 2;\n")]);
    let config = InterpreterConfig { max_call_depth: 8,
                                     ..InterpreterConfig::default() }.with_import_path(dir.path());
    let result = evaluate_with_config("@version 0.01\nimport madola_test_ping;", config);
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ImportFailure));
    assert!(result.error.unwrap_or_default().contains("Maximum call depth of 8 exceeded"));
}

#[test]
fn nested_imports_resolve_through_the_module() {
    let dir = library(&[("madola_test_base.mda", "@version 0.01\nsq(x) := x * x;\n"),
                        ("madola_test_derived.mda",
                         "@version 0.01\nfrom madola_test_base import sq;\nquad(x) := sq(sq(x));\n")]);
    let result = run_with(&dir, "import madola_test_derived;\nprint(quad(2));");
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.outputs, vec!["16"]);
}
