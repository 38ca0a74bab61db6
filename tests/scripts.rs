use std::{fs, path::Path};

use madola::{config::InterpreterConfig, evaluate_with_config};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

const SCRIPT_DIR: &str = "tests/scripts";

#[test]
fn scripts_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new(SCRIPT_DIR).into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "mda"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Missing expected output {expected_path:?}: {e}")
                                                          });

        count += 1;
        let config = InterpreterConfig::default().with_import_path(Path::new(SCRIPT_DIR));
        let result = evaluate_with_config(&source, config);
        if !result.success {
            panic!("Script {path:?} failed:\n{source}\nError: {:?}", result.error);
        }
        assert_eq!(result.outputs.join("\n"),
                   expected.trim_end(),
                   "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in {SCRIPT_DIR}");
}
