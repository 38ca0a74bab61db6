use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Returns the numeric part of a number or quantity argument.
pub(crate) fn numeric_argument(name: &str, value: &Value, line: usize) -> EvalResult<f64> {
    value.numeric_part()
         .ok_or_else(|| RuntimeError::TypeMismatch { details: format!("Function {name} only supports numeric arguments"),
                                                     line })
}

/// Milliseconds since the Unix epoch.
///
/// Arity is checked by the caller.
///
/// # Example
/// ```
/// use madola::interpreter::{evaluator::function::builtin::time, value::core::Value};
///
/// let Value::Number(ms) = time(&[], 1).unwrap() else { panic!() };
/// assert!(ms > 1.0e12);
/// ```
pub fn time(_args: &[Value], line: usize) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|e| RuntimeError::InvalidArgument { details: format!("System clock is before the Unix epoch: {e}"),
                                                                                line })?;
    Ok(Value::Number((elapsed.as_secs_f64() * 1000.0).floor()))
}

/// Square root of a number or of a quantity's numeric part.
///
/// # Errors
/// - `TypeMismatch` for strings, arrays and complex numbers.
/// - `NegativeSquareRoot` for negative input.
///
/// # Example
/// ```
/// use madola::interpreter::{evaluator::function::builtin::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Number(25.0)], 1).unwrap(), Value::Number(5.0));
/// assert!(sqrt(&[Value::Number(-1.0)], 1).is_err());
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let value = numeric_argument("sqrt", &args[0], line)?;
    checked_sqrt(value, line).map(Value::Number)
}

/// Square root that rejects negative input.
pub(crate) fn checked_sqrt(value: f64, line: usize) -> EvalResult<f64> {
    if value < 0.0 {
        return Err(RuntimeError::NegativeSquareRoot { value, line });
    }
    Ok(value.sqrt())
}

/// Applies a trigonometric function to a number or quantity.
///
/// Quantities contribute their numeric part; the unit is dropped.
pub fn trig(name: &str, f: fn(f64) -> f64, args: &[Value], line: usize) -> EvalResult<Value> {
    let value = numeric_argument(name, &args[0], line)?;
    Ok(Value::Number(f(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::quantity::UnitValue;

    #[test]
    fn trig_uses_the_numeric_part_of_quantities() {
        let q = Value::Quantity(UnitValue::new(0.0, "m"));
        assert_eq!(trig("cos", f64::cos, &[q], 1).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn non_numeric_arguments_are_rejected() {
        let err = sqrt(&[Value::from("x")], 4).unwrap_err();
        assert_eq!(err.to_string(), "Error on line 4: Function sqrt only supports numeric arguments");
    }

    #[test]
    fn negative_square_root_reports_the_value() {
        let err = sqrt(&[Value::Number(-4.0)], 2).unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 2: Cannot take square root of negative number: -4.000000");
    }
}
