use madola::{config::InterpreterConfig, error::ErrorKind, evaluate, evaluate_with_config, get_result};
use pretty_assertions::assert_eq;

fn program(body: &str) -> String {
    format!("@version 0.01\n{body}")
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(&program(src), false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(&program(src), false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn outputs(src: &str) -> Vec<String> {
    let result = evaluate(&program(src));
    assert!(result.success, "script failed: {:?}", result.error);
    result.outputs
}

fn failure(src: &str) -> (ErrorKind, String) {
    let result = evaluate(&program(src));
    assert!(!result.success, "script succeeded but was expected to fail");
    (result.error_kind.expect("runtime failures carry a kind"),
     result.error.expect("failures carry a message"))
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_eq!(outputs("x := 1 + 2;\nprint(x);"), vec!["3"]);
    assert_eq!(outputs("print(7 * 9);\nprint(8 - 5);\nprint(10 / 4);"),
               vec!["63", "3", "2.5"]);
    assert_eq!(outputs("print(2 ^ 10);\nprint(7 % 3);"), vec!["1024", "1"]);
    assert_eq!(outputs("print(1 / 3);"), vec!["0.333"]);
}

#[test]
fn operator_precedence() {
    assert_eq!(outputs("print(2 + 3 * 4);\nprint((2 + 3) * 4);\nprint(-2 ^ 2);"),
               vec!["14", "20", "-4"]);
    assert_eq!(outputs("print(1 < 2 && 2 < 3);\nprint(1 > 2 || 0);\nprint(!0);"),
               vec!["1", "0", "1"]);
}

#[test]
fn program_must_declare_its_version() {
    let result = evaluate("x := 1;");
    assert_eq!(result.error_kind, Some(ErrorKind::MissingVersion));

    let result = evaluate("@version 0.02\nprint(1);");
    assert_eq!(result.error.as_deref(),
               Some("Error on line 1: Unsupported version: 0.02. Expected version 0.01"));
    assert!(result.outputs.is_empty());
}

#[test]
fn parse_errors_fail_without_a_kind() {
    let result = evaluate("@version 0.01\nx := (1 + ;");
    assert!(!result.success);
    assert!(result.error.is_some());
    assert_eq!(result.error_kind, None);
}

#[test]
fn strings_concatenate_and_print_escapes() {
    assert_eq!(outputs("name := \"beam\";\nprint(\"span of \" + name + \": \" + 12);"),
               vec!["span of beam: 12"]);
    assert_eq!(outputs("print(\"a\\tb\");"), vec!["a\tb"]);
}

#[test]
fn undefined_names_are_reported() {
    let (kind, message) = failure("y := x + 1;");
    assert_eq!(kind, ErrorKind::UndefinedVariable);
    assert_eq!(message, "Error on line 2: Undefined variable: x");

    let (kind, _) = failure("print(nope(1));");
    assert_eq!(kind, ErrorKind::UndefinedFunction);
}

#[test]
fn division_by_zero() {
    assert_failure("x := 1 / 0;");
    assert_failure("x := 1 % 0;");
    let (kind, _) = failure("x := 5 m / 0;");
    assert_eq!(kind, ErrorKind::DivisionByZero);
}

#[test]
fn user_functions_and_recursion() {
    assert_eq!(outputs("sq(x) := x * x;\nprint(sq(4));"), vec!["16"]);
    assert_eq!(outputs("fact(n) := {\n  if (n <= 1) { return 1; }\n  return n * fact(n - 1);\n}\nprint(fact(5));"),
               vec!["120"]);
    assert_eq!(outputs("fn area(w, h) { return w * h; }\nprint(area(2 m, 3 m));"),
               vec!["6 m^2"]);
}

#[test]
fn functions_see_globals_and_caller_locals() {
    assert_eq!(outputs("g := 10;\nf(x) := x + g;\nprint(f(1));"), vec!["11"]);
    assert_eq!(outputs("inner() := { return local; }\nouter() := { local := 1; return inner(); }\nprint(outer());"),
               vec!["1"]);
    assert_eq!(outputs("f(x) := { return g(); }\ng() := { return x; }\nprint(f(3));"),
               vec!["3"]);
}

#[test]
fn callee_assignments_do_not_reach_the_caller() {
    assert_eq!(outputs("bump() := { v := 99; }\nouter() := { v := 1; t := bump(); return v; }\nprint(outer());"),
               vec!["1"]);
    assert_eq!(outputs("y := 1;\nh() := { y := 5; return y; }\nprint(h());\nprint(y);"),
               vec!["5", "1"]);
}

#[test]
fn function_locals_do_not_leak() {
    let (kind, _) = failure("f() := { tmp := 3; return tmp; }\nx := f();\nprint(tmp);");
    assert_eq!(kind, ErrorKind::UndefinedVariable);
}

#[test]
fn function_without_return_yields_zero() {
    assert_eq!(outputs("f() := { x := 1; }\nprint(f());"), vec!["0"]);
}

#[test]
fn wrong_argument_count() {
    let (kind, message) = failure("f(a, b) := a + b;\nprint(f(1));");
    assert_eq!(kind, ErrorKind::ArgumentCountMismatch);
    assert_eq!(message, "Error on line 3: Function f expects 2 arguments, got 1");
}

#[test]
fn runaway_recursion_hits_the_call_depth_limit() {
    let config = InterpreterConfig { max_call_depth: 32,
                                     ..InterpreterConfig::default() };
    let result = evaluate_with_config(&program("f(n) := f(n + 1);\nprint(f(0));"), config);
    assert_eq!(result.error_kind, Some(ErrorKind::RecursionLimit));
    assert_eq!(result.error.as_deref(),
               Some("Error on line 2: Maximum call depth of 32 exceeded"));
}

#[test]
fn default_call_depth_fits_on_a_small_thread_stack() {
    let worker = std::thread::Builder::new().stack_size(2 * 1024 * 1024)
                                            .spawn(|| {
                                                let deep = evaluate(&program("f(n) := { if (n <= 0) { return 0; } return 1 + f(n - 1); }\nprint(f(250));"));
                                                let runaway = evaluate(&program("f(n) := f(n + 1);\nprint(f(0));"));
                                                (deep, runaway)
                                            })
                                            .unwrap();
    let (deep, runaway) = worker.join().unwrap();

    assert!(deep.success, "{:?}", deep.error);
    assert_eq!(deep.outputs, vec!["250"]);
    assert_eq!(runaway.error_kind, Some(ErrorKind::RecursionLimit));
    assert_eq!(runaway.error.as_deref(),
               Some("Error on line 2: Maximum call depth of 256 exceeded"));
}

#[test]
fn control_flow() {
    assert_eq!(outputs("x := 5;\nif (x > 3) print(\"big\"); else print(\"small\");"),
               vec!["big"]);
    assert_eq!(outputs("x := 2;\nif (x == 1) { print(1); } else if (x == 2) { print(2); } else { print(3); }"),
               vec!["2"]);
    assert_eq!(outputs("total := 0;\nfor i in 1...4 { total := total + i; }\nprint(total);"),
               vec!["10"]);
    assert_eq!(outputs("n := 1;\nwhile (n < 100) { n := n * 2; }\nprint(n);"), vec!["128"]);
}

#[test]
fn break_outside_loop_fails() {
    let (kind, message) = failure("break;");
    assert_eq!(kind, ErrorKind::ControlFlowMisuse);
    assert_eq!(message, "Error on line 2: Break statement outside of loop");
}

#[test]
fn units_flow_through_arithmetic() {
    assert_eq!(outputs("L := 1 m + 50 cm;\nprint(L);"), vec!["1.5 m"]);
    assert_eq!(outputs("print(3 m * 2);\nprint(6 m / 2 m);"), vec!["6 m", "3"]);
    assert_eq!(outputs("print(2 ft > 20 in);"), vec!["1"]);
    let (kind, message) = failure("x := 1 m + 1 s;");
    assert_eq!(kind, ErrorKind::DimensionMismatch);
    assert_eq!(message, "Error on line 2: Cannot add incompatible units: m + s");
    let (kind, _) = failure("x := 1 m + 1;");
    assert_eq!(kind, ErrorKind::DimensionMismatch);
}

#[test]
fn predefined_unit_variables() {
    assert_eq!(outputs("force := 5 * kN;\nprint(force);"), vec!["5 kN"]);
}

#[test]
fn complex_numbers() {
    assert_eq!(outputs("z := 3 + 4i;\nprint(z);\nprint(z * 2);"),
               vec!["3 + 4i", "6 + 8i"]);
    let (kind, _) = failure("x := 1i < 2;");
    assert_eq!(kind, ErrorKind::Unsupported);
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(outputs("v := [1, 2, 3];\nprint(v);\nprint(v[1]);\nprint(v * 2);"),
               vec!["[1, 2, 3]", "2", "[2, 4, 6]"]);
    assert_eq!(outputs("c := [1; 2];\nprint(c);\nprint(type(c));"),
               vec!["[1; 2]", "column_vector"]);
    assert_eq!(outputs("m := [1, 2; 3, 4];\nprint(m[1]);\nprint(m * [1; 1]);"),
               vec!["[3, 4]", "[3; 7]"]);
    let (kind, message) = failure("v := [1, 2];\nx := v[5];");
    assert_eq!(kind, ErrorKind::IndexOutOfBounds);
    assert_eq!(message, "Error on line 3: Array index 5 out of bounds for array 'v' (size: 2)");
}

#[test]
fn pipe_substitution_is_temporary() {
    assert_eq!(outputs("f := 2;\nprint(a * b | a: 3, b: 4);\nprint(f);"),
               vec!["12", "2"]);
    let (kind, _) = failure("y := a + 1 | a: 1;\nprint(a);");
    assert_eq!(kind, ErrorKind::UndefinedVariable);
}

#[test]
fn piecewise_functions() {
    let src = "sgn(x) := piecewise {\n  (-1, x < 0),\n  (0, x == 0),\n  (1, otherwise)\n};\nprint(sgn(-5));\nprint(sgn(0));\nprint(sgn(9));";
    assert_eq!(outputs(src), vec!["-1", "0", "1"]);
    assert_eq!(outputs("x := 4;\ny := piecewise { (1, x < 0), (2, x > 10) };\nprint(y);"),
               vec!["0"]);
}

#[test]
fn builtin_math() {
    assert_eq!(outputs("print(sqrt(16));\nprint(sin(0));\nprint(cos(0));"),
               vec!["4", "0", "1"]);
    assert_eq!(outputs("print(math.max([3, 9, 2]));\nprint(math.sum([1, 2, 3]));\nprint(math.mod(7, 4));"),
               vec!["9", "6", "3"]);
    assert_eq!(outputs("print(math.summation(i ^ 2, i, 1, 3));"), vec!["14"]);
    let (kind, _) = failure("x := sqrt(-4);");
    assert_eq!(kind, ErrorKind::NegativeSquareRoot);
}

#[test]
fn matrix_methods() {
    assert_eq!(outputs("A := [2, 0; 0, 3];\nprint(A.det());\nprint(A.trace());\nprint(A.T());"),
               vec!["6", "5", "[[2, 0]; [0, 3]]"]);
    let (kind, _) = failure("A := [1, 2; 2, 4];\nB := A.inv();");
    assert_eq!(kind, ErrorKind::Singular);
}

#[test]
fn type_reports_value_kinds() {
    assert_eq!(outputs("a := 1;\nb := \"s\";\nc := 2 m;\nd := [1, 2];\ne := [1, 2; 3, 4];\nprint(type(a));\nprint(type(b));\nprint(type(c));\nprint(type(d));\nprint(type(e));\nprint(type(missing));"),
               vec!["number", "string", "unit", "array", "matrix", "undefined"]);
    let (kind, _) = failure("print(type(1));");
    assert_eq!(kind, ErrorKind::TypeMismatch);
}

#[test]
fn decorators_and_comments_are_ignored() {
    assert_success("// a comment\n/* a\n   block */\n@h1\nx := 1;\n@skip");
    assert_eq!(outputs("@gen_cpp\nf(x) := x;\n@gen_addon\nprint(\"hidden\");\nprint(\"shown\");"),
               vec!["shown"]);
}

#[test]
fn graphs_and_tables_are_recorded() {
    let result = evaluate(&program("x := [1, 2, 3];\ngraph(x, x * 2, \"double\");\ntable([\"x\", \"y\"], x, x * 2);"));
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.graphs.len(), 1);
    assert_eq!(result.graphs[0].title, "double");
    assert_eq!(result.graphs[0].y, vec![2.0, 4.0, 6.0]);
    assert_eq!(result.tables[0].headers, vec!["x", "y"]);
    assert_eq!(result.outputs,
               vec!["Graph 1 created with 3 data points", "Table 1 created with 2 columns and 3 rows"]);
}

#[test]
fn partial_output_is_kept_on_failure() {
    let result = evaluate(&program("print(\"before\");\nx := undefined_thing;\nprint(\"after\");"));
    assert!(!result.success);
    assert_eq!(result.outputs, vec!["before"]);
    assert_failure("print(\"before\");\nx := undefined_thing;");
}
