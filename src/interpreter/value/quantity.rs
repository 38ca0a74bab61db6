use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        units::{
            are_units_compatible, conversion_factor,
            simplify::{power_unit, simplify_unit},
        },
    },
    util::num::{f64_to_i32_checked, format_number},
};

/// A number tagged with a unit string.
///
/// An empty unit means the quantity is dimensionless. Arithmetic checks that
/// units agree before combining values, and the result unit is simplified.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    /// The magnitude, expressed in `unit`.
    pub value: f64,
    /// The unit expression, possibly empty.
    pub unit:  String,
}

impl Display for UnitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", format_number(self.value))
        } else {
            write!(f, "{} {}", format_number(self.value), self.unit)
        }
    }
}

impl UnitValue {
    /// Creates a quantity.
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self { value,
               unit: unit.into() }
    }

    /// Creates a dimensionless quantity.
    #[must_use]
    pub const fn dimensionless(value: f64) -> Self {
        Self { value,
               unit: String::new() }
    }

    /// Returns `true` when the unit is empty.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_empty()
    }

    /// Expresses `other`'s magnitude in this quantity's unit.
    fn converted(&self, other: &Self) -> f64 {
        other.value * conversion_factor(&other.unit) / conversion_factor(&self.unit)
    }

    fn check_additive(&self, other: &Self, verb: &str, symbol: char, line: usize) -> EvalResult<()> {
        if self.is_dimensionless() != other.is_dimensionless() {
            let preposition = if verb == "add" { "to" } else { "from" };
            return Err(RuntimeError::DimensionMismatch { details: format!("Cannot {verb} dimensionless value {preposition} value with units"),
                                                         line });
        }
        if !are_units_compatible(&self.unit, &other.unit) {
            return Err(RuntimeError::DimensionMismatch { details: format!("Cannot {verb} incompatible units: {} {symbol} {}",
                                                                          self.unit, other.unit),
                                                         line });
        }
        Ok(())
    }

    /// Adds two quantities, converting `other` into this unit.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::quantity::UnitValue;
    ///
    /// let a = UnitValue::new(1.0, "m");
    /// let b = UnitValue::new(50.0, "cm");
    /// let sum = a.add(&b, 1).unwrap();
    /// assert_eq!(sum.unit, "m");
    /// assert!((sum.value - 1.5).abs() < 1e-12);
    ///
    /// assert!(a.add(&UnitValue::new(1.0, "s"), 1).is_err());
    /// ```
    pub fn add(&self, other: &Self, line: usize) -> EvalResult<Self> {
        self.check_additive(other, "add", '+', line)?;
        Ok(Self::new(self.value + self.converted(other), self.unit.clone()))
    }

    /// Subtracts `other`, converting it into this unit first.
    pub fn sub(&self, other: &Self, line: usize) -> EvalResult<Self> {
        self.check_additive(other, "subtract", '-', line)?;
        Ok(Self::new(self.value - self.converted(other), self.unit.clone()))
    }

    /// Multiplies two quantities and combines their units.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::quantity::UnitValue;
    ///
    /// let stress = UnitValue::new(2.0, "ksi");
    /// let modulus = UnitValue::new(3.0, "in3");
    /// let moment = stress.mul(&modulus);
    /// assert_eq!(moment.to_string(), "6 kip-in");
    /// ```
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let unit = match (self.is_dimensionless(), other.is_dimensionless()) {
            (true, _) => other.unit.clone(),
            (false, true) => self.unit.clone(),
            (false, false) => simplify_unit(&format!("({})*({})", self.unit, other.unit)),
        };
        Self::new(self.value * other.value, unit)
    }

    /// Divides by `other` and combines the units.
    ///
    /// Fails with [`RuntimeError::DivisionByZero`] when `other` is zero.
    pub fn div(&self, other: &Self, line: usize) -> EvalResult<Self> {
        if other.value == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }
        let unit = match (self.is_dimensionless(), other.is_dimensionless()) {
            (_, true) => self.unit.clone(),
            (true, false) => simplify_unit(&format!("1/({})", other.unit)),
            (false, false) => simplify_unit(&format!("({})/({})", self.unit, other.unit)),
        };
        Ok(Self::new(self.value / other.value, unit))
    }

    /// Takes the remainder of the magnitudes, keeping this unit.
    pub fn rem(&self, other: &Self, line: usize) -> EvalResult<Self> {
        if other.value == 0.0 {
            return Err(RuntimeError::ModuloByZero { line });
        }
        Ok(Self::new(self.value % other.value, self.unit.clone()))
    }

    /// Raises the quantity to a dimensionless power.
    ///
    /// The unit is raised to the exponent truncated toward zero.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::quantity::UnitValue;
    ///
    /// let side = UnitValue::new(3.0, "m");
    /// let area = side.pow(&UnitValue::dimensionless(2.0), 1).unwrap();
    /// assert_eq!(area.to_string(), "9 m^2");
    ///
    /// assert!(side.pow(&side, 1).is_err());
    /// ```
    ///
    /// # Errors
    /// - `DimensionMismatch` when the exponent carries a unit.
    /// - `DimensionMismatch` when a unit exponent would leave the `i32`
    ///   range.
    pub fn pow(&self, exponent: &Self, line: usize) -> EvalResult<Self> {
        if !exponent.is_dimensionless() {
            return Err(RuntimeError::DimensionMismatch { details: "Exponent must be dimensionless".to_string(),
                                                         line });
        }
        let value = self.value.powf(exponent.value);
        if self.is_dimensionless() {
            return Ok(Self::new(value, ""));
        }

        let out_of_range = || RuntimeError::DimensionMismatch { details: format!("Unit exponent out of range: ({})^{}",
                                                                                 self.unit,
                                                                                 format_number(exponent.value)),
                                                                line };
        let power = f64_to_i32_checked(exponent.value.trunc(), (), ()).map_err(|()| out_of_range())?;
        let unit = power_unit(&self.unit, power).ok_or_else(out_of_range)?;
        Ok(Self::new(value, unit))
    }

    /// Returns the pair of magnitudes a comparison should use.
    ///
    /// Compatible non-empty units are compared after converting `other` into
    /// this unit. Anything else compares the raw magnitudes.
    #[must_use]
    pub fn comparable(&self, other: &Self) -> (f64, f64) {
        if !self.is_dimensionless()
           && !other.is_dimensionless()
           && are_units_compatible(&self.unit, &other.unit)
        {
            (self.value, self.converted(other))
        } else {
            (self.value, other.value)
        }
    }
}
