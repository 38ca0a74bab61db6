use serde::Serialize;

/// Physical dimension a unit measures.
///
/// Two units may be added or compared only when they share a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Length,
    Mass,
    Time,
    Force,
    Pressure,
    Area,
    Volume,
    Temperature,
    Dimensionless,
}

/// Exponents of length, mass, time and temperature that make up a dimension.
pub type Signature = [i32; 4];

impl Dimension {
    /// Every dimension except [`Dimension::Dimensionless`], in lookup order.
    const NAMED: [Self; 8] = [Self::Length,
                              Self::Mass,
                              Self::Time,
                              Self::Force,
                              Self::Pressure,
                              Self::Area,
                              Self::Volume,
                              Self::Temperature];

    /// Returns the base-quantity exponents of this dimension.
    ///
    /// Force is `kg·m/s²` and pressure is force per area, so compound units
    /// built from different families can still be compared.
    #[must_use]
    pub const fn signature(self) -> Signature {
        match self {
            Self::Length => [1, 0, 0, 0],
            Self::Mass => [0, 1, 0, 0],
            Self::Time => [0, 0, 1, 0],
            Self::Force => [1, 1, -2, 0],
            Self::Pressure => [-1, 1, -2, 0],
            Self::Area => [2, 0, 0, 0],
            Self::Volume => [3, 0, 0, 0],
            Self::Temperature => [0, 0, 0, 1],
            Self::Dimensionless => [0, 0, 0, 0],
        }
    }

    /// Maps a signature back to a named dimension, if one matches.
    #[must_use]
    pub fn from_signature(signature: Signature) -> Option<Self> {
        if signature == [0; 4] {
            return Some(Self::Dimensionless);
        }
        Self::NAMED.into_iter().find(|d| d.signature() == signature)
    }
}

/// A registered unit symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    /// The symbol as written in source, e.g. `kN`.
    pub symbol:            &'static str,
    /// What the unit measures.
    pub dimension:         Dimension,
    /// Multiply by this to convert into the base unit.
    pub conversion_factor: f64,
    /// The base unit of the dimension.
    pub base_unit:         &'static str,
    /// Expansion used when simplifying compound units, e.g. `ksi` to
    /// `kip/in^2`.
    pub composite:         Option<&'static str>,
}

/// Declares the unit table.
///
/// Each row is `symbol => (dimension, factor, base)` with an optional
/// `composite "..."` suffix.
macro_rules! unit_table {
    (
        $(
            $symbol:literal => ($dim:ident, $factor:expr, $base:literal $(, composite $comp:literal)?)
        ),* $(,)?
    ) => {
        /// All built-in units.
        pub static UNIT_TABLE: &[UnitDefinition] = &[
            $(
                UnitDefinition {
                    symbol: $symbol,
                    dimension: Dimension::$dim,
                    conversion_factor: $factor,
                    base_unit: $base,
                    composite: unit_table!(@composite $($comp)?),
                },
            )*
        ];
    };
    (@composite $comp:literal) => { Some($comp) };
    (@composite) => { None };
}

unit_table! {
    "m"   => (Length, 1.0, "m"),
    "mm"  => (Length, 0.001, "m"),
    "cm"  => (Length, 0.01, "m"),
    "km"  => (Length, 1000.0, "m"),
    "in"  => (Length, 0.0254, "m"),
    "ft"  => (Length, 0.3048, "m"),
    "yd"  => (Length, 0.9144, "m"),
    "mi"  => (Length, 1609.34, "m"),

    "kg"  => (Mass, 1.0, "kg"),
    "g"   => (Mass, 0.001, "kg"),
    "mg"  => (Mass, 0.000_001, "kg"),
    "lb"  => (Mass, 0.453_592, "kg"),
    "oz"  => (Mass, 0.028_349_5, "kg"),
    "ton" => (Mass, 907.185, "kg"),

    "N"   => (Force, 1.0, "N"),
    "kN"  => (Force, 1000.0, "N"),
    "lbf" => (Force, 4.448_22, "N"),
    "kip" => (Force, 4448.22, "N"),

    "Pa"  => (Pressure, 1.0, "Pa"),
    "kPa" => (Pressure, 1000.0, "Pa"),
    "MPa" => (Pressure, 1e6, "Pa"),
    "GPa" => (Pressure, 1e9, "Pa"),
    "psi" => (Pressure, 6894.76, "Pa", composite "lbf/in^2"),
    "ksi" => (Pressure, 6.894_76e6, "Pa", composite "kip/in^2"),

    "m2"  => (Area, 1.0, "m2"),
    "mm2" => (Area, 1e-6, "m2"),
    "cm2" => (Area, 1e-4, "m2"),
    "in2" => (Area, 0.000_645_16, "m2"),
    "ft2" => (Area, 0.092_903, "m2"),

    "m3"  => (Volume, 1.0, "m3"),
    "mm3" => (Volume, 1e-9, "m3"),
    "cm3" => (Volume, 1e-6, "m3"),
    "in3" => (Volume, 1.638_71e-5, "m3"),
    "ft3" => (Volume, 0.028_316_8, "m3"),
    "L"   => (Volume, 0.001, "m3"),
    "gal" => (Volume, 0.003_785_41, "m3"),

    "s"   => (Time, 1.0, "s"),
    "ms"  => (Time, 0.001, "s"),
    "min" => (Time, 60.0, "s"),
    "h"   => (Time, 3600.0, "s"),

    "K"   => (Temperature, 1.0, "K"),
    "C"   => (Temperature, 1.0, "K"),
    "F"   => (Temperature, 0.555_556, "K"),
}

/// Symbols bound as `1 <unit>` variables before a program runs.
pub const PREDEFINED_UNITS: &[&str] = &["mm", "cm", "m", "km", "in", "ft", "yd", "mi", "kg", "g",
                                        "mg", "lb", "oz", "ton", "N", "kN", "lbf", "kip", "Pa",
                                        "kPa", "MPa", "GPa", "psi", "ksi", "s", "ms", "min", "h",
                                        "K", "C", "F", "L", "gal"];

/// Looks up a registered unit symbol.
///
/// # Example
/// ```
/// use madola::interpreter::units::registry::{Dimension, lookup};
///
/// let kip = lookup("kip").unwrap();
/// assert_eq!(kip.dimension, Dimension::Force);
/// assert!(lookup("furlong").is_none());
/// ```
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static UnitDefinition> {
    UNIT_TABLE.iter().find(|def| def.symbol == symbol)
}

/// Ordering class used when printing compound units: force units first,
/// then lengths, then everything else.
#[must_use]
pub fn display_class(symbol: &str) -> u8 {
    match symbol {
        "kip" | "lbf" | "N" | "kN" => 0,
        "in" | "ft" | "m" | "mm" | "cm" => 1,
        _ => 2,
    }
}
