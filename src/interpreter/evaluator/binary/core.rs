use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{
                array::{array_array, array_scalar, scalar_array},
                scalar::{complex_op, concat, number_op, quantity_op},
            },
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation between two values.
    ///
    /// Operand kinds are resolved in a fixed order:
    /// 1. `+` with a string on either side concatenates.
    /// 2. A complex operand selects complex arithmetic.
    /// 3. An array and a number broadcast elementwise.
    /// 4. Two arrays combine elementwise, or by a matrix product for `*`.
    /// 5. Two numbers use plain floating point arithmetic.
    /// 6. Anything else is promoted to quantities and uses unit arithmetic.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use madola::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                    &Value::Number(3.0),
    ///                                    &Value::Number(4.0),
    ///                                    1);
    /// assert_eq!(sum.unwrap(), Value::Number(7.0));
    ///
    /// let text = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                     &Value::from("n = "),
    ///                                     &Value::Number(2.0),
    ///                                     1);
    /// assert_eq!(text.unwrap(), Value::from("n = 2"));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        use Value::{Array, Complex, Number};

        if op == BinaryOperator::Add
           && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
        {
            return Ok(concat(left, right));
        }

        match (left, right) {
            (Complex(_), _) | (_, Complex(_)) => complex_op(op, left, right, line),
            (Array(a), Number(n)) => array_scalar(op, a, *n, line),
            (Number(n), Array(a)) => scalar_array(op, *n, a, line),
            (Array(a), Array(b)) => array_array(op, a, b, line),
            (Number(a), Number(b)) => number_op(op, *a, *b, line),
            _ => quantity_op(op, left, right, line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        interpreter::value::{array::ArrayValue, complex::ComplexNumber, quantity::UnitValue},
    };

    fn eval(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Interpreter::eval_binary(op, &left, &right, 1)
    }

    #[test]
    fn complex_promotes_numbers() {
        let i = Value::Complex(ComplexNumber::new(0.0, 1.0));
        let v = eval(BinaryOperator::Add, Value::Number(2.0), i).unwrap();
        assert_eq!(v, Value::Complex(ComplexNumber::new(2.0, 1.0)));
    }

    #[test]
    fn complex_rejects_comparison() {
        let i = Value::Complex(ComplexNumber::new(0.0, 1.0));
        let err = eval(BinaryOperator::Less, i, Value::Number(1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn quantity_and_number_multiply() {
        let v = eval(BinaryOperator::Mul,
                     Value::Number(10.0),
                     Value::Quantity(UnitValue::new(1.0, "ft"))).unwrap();
        assert_eq!(v, Value::Quantity(UnitValue::new(10.0, "ft")));
    }

    #[test]
    fn array_broadcasts_scalar() {
        let v = eval(BinaryOperator::Mul,
                     Value::Array(ArrayValue::row(vec![1.0, 2.0])),
                     Value::Number(3.0)).unwrap();
        assert_eq!(v, Value::Array(ArrayValue::row(vec![3.0, 6.0])));
    }

    #[test]
    fn string_cannot_be_subtracted() {
        let err = eval(BinaryOperator::Sub, Value::from("a"), Value::Number(1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
