use std::fmt::Display;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{array::ArrayValue, complex::ComplexNumber, quantity::UnitValue},
    },
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models every value an expression can produce: plain numbers,
/// strings, complex numbers, quantities carrying a unit, and numeric arrays.
/// Comparisons and logical operators produce `Number(1.0)` or `Number(0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A plain double precision number.
    Number(f64),
    /// A string literal or the result of concatenation.
    String(String),
    /// A complex number.
    Complex(ComplexNumber),
    /// A number with a unit.
    Quantity(UnitValue),
    /// A vector or matrix of numbers.
    Array(ArrayValue),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl From<UnitValue> for Value {
    fn from(q: UnitValue) -> Self {
        Self::Quantity(q)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Self::Array(a)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{}", process_escapes(s)),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Quantity(q) => write!(f, "{q}"),
            Self::Array(a) => write!(f, "{a}"),
        }
    }
}

/// Replaces the escape sequences `\n`, `\t`, `\r`, `\\` and `\"`.
///
/// Unknown sequences are kept as written.
///
/// # Example
/// ```
/// use madola::interpreter::value::core::process_escapes;
///
/// assert_eq!(process_escapes(r"a\tb"), "a\tb");
/// assert_eq!(process_escapes(r#"say \"hi\""#), "say \"hi\"");
/// assert_eq!(process_escapes(r"\q"), r"\q");
/// ```
#[must_use]
pub fn process_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}

impl Value {
    /// Returns the name reported by the `type()` builtin.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::{array::ArrayValue, core::Value};
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "number");
    /// assert_eq!(Value::Array(ArrayValue::column(vec![1.0])).type_name(), "column_vector");
    /// assert_eq!(Value::Array(ArrayValue::row(vec![1.0])).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Quantity(_) => "unit",
            Self::Array(ArrayValue::Matrix(_)) => "matrix",
            Self::Array(ArrayValue::Vector { column: true, .. }) => "column_vector",
            Self::Array(ArrayValue::Vector { column: false, .. }) => "array",
            Self::Complex(_) => "unknown",
        }
    }

    /// Returns the truth value of scalars, or `None` for other kinds.
    ///
    /// Nonzero numbers, nonempty strings and nonzero quantities are true.
    #[must_use]
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            Self::Number(n) => Some(*n != 0.0),
            Self::String(s) => Some(!s.is_empty()),
            Self::Quantity(q) => Some(q.value != 0.0),
            Self::Complex(_) | Self::Array(_) => None,
        }
    }

    /// Returns the magnitude of a number or quantity.
    #[must_use]
    pub const fn numeric_part(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Quantity(q) => Some(q.value),
            _ => None,
        }
    }

    /// Converts the value to an `f64`, or returns an error if it is not a
    /// plain number.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    /// - `what`: Describes the operand in the error message.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.0).as_number("argument", 1).unwrap(), 2.0);
    /// assert!(Value::from("x").as_number("argument", 1).is_err());
    /// ```
    pub fn as_number(&self, what: &str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch { details: format!("{what} must be a number, got {}",
                                                                       other.describe()),
                                                      line }),
        }
    }

    /// Promotes a number or quantity to a [`UnitValue`] for unit arithmetic.
    pub fn to_quantity(&self, line: usize) -> EvalResult<UnitValue> {
        match self {
            Self::Number(n) => Ok(UnitValue::dimensionless(*n)),
            Self::Quantity(q) => Ok(q.clone()),
            other => Err(RuntimeError::TypeMismatch { details: format!("Cannot use {} in unit arithmetic",
                                                                       other.describe()),
                                                      line }),
        }
    }

    /// Short description used in error messages, e.g. `string: 'abc'`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number: {}", format_number(*n)),
            Self::String(s) => format!("string: '{s}'"),
            Self::Complex(_) => "complex number".to_string(),
            Self::Quantity(_) => "unit value".to_string(),
            Self::Array(_) => "array value".to_string(),
        }
    }
}
