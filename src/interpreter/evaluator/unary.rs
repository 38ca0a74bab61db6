use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, quantity::UnitValue},
    },
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: negation of numbers, arrays (elementwise), complex numbers
    ///   and quantities.
    /// - `Plus`: returns the operand unchanged.
    /// - `Not`: logical negation of a number, giving `1` or `0`.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use madola::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::Number(0.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(1.0));
    ///
    /// assert!(Interpreter::eval_unary(UnaryOperator::Negate, &Value::from("x"), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, Value::Number(_) | Value::Array(_) | Value::Complex(_) | Value::Quantity(_)) => {
                Ok(value.clone())
            },
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Negate, Value::Array(array)) => Ok(Value::Array(array.map(|v| -v))),
            (UnaryOperator::Negate, Value::Complex(c)) => Ok(Value::Complex(-*c)),
            (UnaryOperator::Negate, Value::Quantity(q)) => {
                Ok(Value::Quantity(UnitValue::new(-q.value, q.unit.as_str())))
            },
            (UnaryOperator::Not, Value::Number(n)) => Ok(Value::from(*n == 0.0)),
            (UnaryOperator::Not, Value::Array(_)) => {
                Err(RuntimeError::TypeMismatch { details: format!("Unknown unary operator for arrays: {op}"),
                                                 line })
            },
            _ => Err(RuntimeError::TypeMismatch { details: "Unary operations only supported on numbers and arrays".to_string(),
                                                  line }),
        }
    }
}
