/// The table of built-in unit symbols and their dimensions.
pub mod registry;
/// Parsing, simplification and analysis of compound unit strings.
pub mod simplify;

use crate::interpreter::units::{
    registry::{Dimension, lookup},
    simplify::{analyze, simplify_unit},
};

/// Returns `true` if `unit` is empty or a registered symbol.
///
/// # Example
/// ```
/// use madola::interpreter::units::is_valid_unit;
///
/// assert!(is_valid_unit(""));
/// assert!(is_valid_unit("kN"));
/// assert!(!is_valid_unit("parsec"));
/// ```
#[must_use]
pub fn is_valid_unit(unit: &str) -> bool {
    unit.is_empty() || lookup(unit).is_some()
}

/// Returns the dimension of a unit.
///
/// Registered symbols report their own dimension. Compound units built from
/// registered symbols report the dimension whose signature they match.
/// Anything else is [`Dimension::Dimensionless`].
///
/// # Example
/// ```
/// use madola::interpreter::units::{registry::Dimension, unit_dimension};
///
/// assert_eq!(unit_dimension("ft"), Dimension::Length);
/// assert_eq!(unit_dimension("in^2"), Dimension::Area);
/// assert_eq!(unit_dimension("kip/in^2"), Dimension::Pressure);
/// assert_eq!(unit_dimension("widgets"), Dimension::Dimensionless);
/// ```
#[must_use]
pub fn unit_dimension(unit: &str) -> Dimension {
    if let Some(def) = lookup(unit) {
        return def.dimension;
    }
    analyze(unit).and_then(|(signature, _)| Dimension::from_signature(signature))
                 .unwrap_or(Dimension::Dimensionless)
}

/// Returns the factor that converts `unit` into its base unit, or `1.0` for
/// unknown units.
#[must_use]
pub fn conversion_factor(unit: &str) -> f64 {
    if let Some(def) = lookup(unit) {
        return def.conversion_factor;
    }
    analyze(unit).map_or(1.0, |(_, factor)| factor)
}

/// Returns the base unit of a registered symbol, or an empty string.
#[must_use]
pub fn base_unit(unit: &str) -> &'static str {
    lookup(unit).map_or("", |def| def.base_unit)
}

/// Decides whether quantities in `u1` and `u2` may be added or compared.
///
/// Two dimensionless units are compatible; a dimensionless and a dimensioned
/// unit are not. Otherwise the units must measure the same thing. Units that
/// contain unregistered symbols are only compatible with themselves.
///
/// # Example
/// ```
/// use madola::interpreter::units::are_units_compatible;
///
/// assert!(are_units_compatible("m", "ft"));
/// assert!(are_units_compatible("in3", "in^3"));
/// assert!(are_units_compatible("ksi", "kip/in^2"));
/// assert!(!are_units_compatible("m", "s"));
/// assert!(!are_units_compatible("m", ""));
/// ```
#[must_use]
pub fn are_units_compatible(u1: &str, u2: &str) -> bool {
    match (u1.is_empty(), u2.is_empty()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {},
    }
    if u1 == u2 || simplify_unit(u1) == simplify_unit(u2) {
        return true;
    }
    match (analyze(u1), analyze(u2)) {
        (Some((a, _)), Some((b, _))) => a == b,
        _ => false,
    }
}
