use madola::{
    error::ErrorKind,
    evaluate,
    interpreter::{
        units::{
            are_units_compatible, conversion_factor,
            registry::{Dimension, UNIT_TABLE},
            simplify::{power_unit, simplify_unit},
            unit_dimension,
        },
        value::quantity::UnitValue,
    },
};
use pretty_assertions::assert_eq;

fn outputs(body: &str) -> Vec<String> {
    let result = evaluate(&format!("@version 0.01\n{body}"));
    assert!(result.success, "script failed: {:?}", result.error);
    result.outputs
}

#[test]
fn simplification_is_idempotent() {
    for unit in ["m", "m*m", "kip/in^2", "ksi*in3", "kN/m", "in*kip/s^2", "m/m", "1/s", "widgets", ""] {
        let once = simplify_unit(unit);
        assert_eq!(simplify_unit(&once), once, "simplifying {unit:?}");
    }
}

#[test]
fn simplification_combines_and_orders_terms() {
    assert_eq!(simplify_unit("m*kN"), "kN-m");
    assert_eq!(simplify_unit("ksi*in3"), "kip-in");
    assert_eq!(simplify_unit("s/s"), "");
    assert_eq!(power_unit("kN/m", 2).as_deref(), Some("kN^2/m^2"));
}

#[test]
fn compatibility_is_symmetric() {
    let units = ["m", "ft", "in", "s", "kN", "kip", "ksi", "MPa", "in^2", "in2", ""];
    for a in units {
        for b in units {
            assert_eq!(are_units_compatible(a, b),
                       are_units_compatible(b, a),
                       "{a:?} vs {b:?}");
        }
    }
    assert!(are_units_compatible("MPa", "ksi"));
    assert!(!are_units_compatible("kN", "MPa"));
}

#[test]
fn addition_commutes_across_compatible_units() {
    let mut pairs = 0;
    for a in UNIT_TABLE {
        for b in UNIT_TABLE {
            if !are_units_compatible(a.symbol, b.symbol) {
                continue;
            }
            pairs += 1;
            let x = UnitValue::new(2.5, a.symbol);
            let y = UnitValue::new(7.0, b.symbol);
            let xy = x.add(&y, 1).unwrap();
            let yx = y.add(&x, 1).unwrap();
            assert_eq!(xy.unit, a.symbol);
            assert_eq!(yx.unit, b.symbol);

            let left = xy.value * conversion_factor(&xy.unit);
            let right = yx.value * conversion_factor(&yx.unit);
            assert!((left - right).abs() <= 1e-9 * left.abs().max(right.abs()),
                    "{} + {}: {left} vs {right}",
                    a.symbol,
                    b.symbol);
        }
    }
    assert!(pairs > UNIT_TABLE.len());
}

#[test]
fn mixed_length_sums_agree_in_either_order() {
    assert_eq!(outputs("print(1 ft + 6 in == 6 in + 1 ft);"), vec!["1"]);
}

#[test]
fn dimensions_and_factors() {
    assert_eq!(unit_dimension("kip"), Dimension::Force);
    assert_eq!(unit_dimension("kN/m^2"), Dimension::Pressure);
    assert!((conversion_factor("ft") - 0.3048).abs() < 1e-12);
    assert!((conversion_factor("km/h") - 1000.0 / 3600.0).abs() < 1e-12);
}

#[test]
fn compound_units_from_programs() {
    assert_eq!(outputs("M := 2 ksi * 3 in^3;\nprint(M);"), vec!["6 kip-in"]);
    assert_eq!(outputs("w := 10 kN / 2 m;\nprint(w);"), vec!["5 kN/m"]);
    assert_eq!(outputs("A := (3 m) ^ 2;\nprint(A);"), vec!["9 m^2"]);
}

#[test]
fn unregistered_units_match_only_themselves() {
    assert!(are_units_compatible("widget", "widget"));
    assert!(are_units_compatible("widget/s", "widget/s"));
    assert!(!are_units_compatible("widget", "gadget"));
    assert!(!are_units_compatible("widget", "m"));
}

#[test]
fn comparisons_convert_the_right_operand() {
    assert_eq!(outputs("print(1 ft > 6 in);\nprint(6 in < 1 ft);\nprint(2 kN >= 2000 N);"),
               vec!["1", "1", "1"]);
}

#[test]
fn mixed_length_units_convert() {
    assert_eq!(outputs("x := 1 in + 1 ft;\nprint(x);"), vec!["13 in"]);
    assert_eq!(outputs("print(12 in < 1.5 ft);\nprint(1 km == 1000 m);"), vec!["1", "1"]);
}

#[test]
fn incompatible_units_are_rejected() {
    let result = evaluate("@version 0.01\nx := 5 kN - 2 m;");
    assert_eq!(result.error_kind, Some(ErrorKind::DimensionMismatch));
    assert_eq!(result.error.as_deref(),
               Some("Error on line 2: Cannot subtract incompatible units: kN - m"));

    let result = evaluate("@version 0.01\nx := (2 m) ^ (2 m);");
    assert_eq!(result.error.as_deref(),
               Some("Error on line 2: Exponent must be dimensionless"));
}

#[test]
fn huge_unit_exponents_are_rejected() {
    assert_eq!(power_unit("m^2", i32::MAX), None);
    assert_eq!(power_unit("m", i32::MIN), None);
    assert_eq!(power_unit("m", i32::MAX).as_deref(), Some("m^2147483647"));

    for body in ["x := 2 m^2;\ny := x ^ 3000000000;",
                 "x := 2 m^2;\ny := x ^ 2000000000;",
                 "x := 2 m;\ny := x ^ 1e12;"]
    {
        let result = evaluate(&format!("@version 0.01\n{body}"));
        assert_eq!(result.error_kind, Some(ErrorKind::DimensionMismatch), "{body}");
        let message = result.error.unwrap_or_default();
        assert!(message.starts_with("Error on line 3: Unit exponent out of range"),
                "{message}");
    }
}

#[test]
fn dimensionless_results_become_numbers() {
    assert_eq!(outputs("r := 3 ft / 1 ft;\nprint(r);\nprint(type(r));"), vec!["3", "number"]);
}
