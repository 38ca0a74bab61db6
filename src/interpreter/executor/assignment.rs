use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::array_index,
        },
        value::{array::ArrayValue, core::Value},
    },
};

impl Interpreter {
    /// Binds `name` to the value of `value` in the current frame.
    pub(crate) fn exec_assignment(&mut self, name: &str, value: &Expr) -> EvalResult<()> {
        let value = self.eval(value)?;
        trace!(variable = name, %value, "assign");
        self.env.define(name, value);
        Ok(())
    }

    /// Executes `name[index] := value`.
    ///
    /// A missing `name` starts out as an empty column vector. The vector
    /// grows with zeros up to `index`. Quantities store their numeric part.
    ///
    /// Every check runs before the array is modified.
    ///
    /// # Errors
    /// - `InvalidIndex` when the index is not a non-negative integer.
    /// - `TypeMismatch` when `name` is bound to something other than a
    ///   vector, or when the value is not a number or quantity.
    pub(crate) fn exec_array_assignment(&mut self,
                                        name: &str,
                                        index: &Expr,
                                        value: &Expr,
                                        line: usize)
                                        -> EvalResult<()> {
        let index = array_index(&self.eval(index)?, line)?;
        let value = self.eval(value)?;
        let Ok(index) = usize::try_from(index) else {
            return Err(RuntimeError::InvalidIndex { details: format!("Array index must be non-negative, got: {index}"),
                                                    line });
        };

        let (mut elements, column) = match self.env.lookup(name) {
            None => (Vec::new(), true),
            Some(Value::Array(ArrayValue::Vector { elements, column })) => (elements.clone(), *column),
            Some(Value::Array(ArrayValue::Matrix(_))) => {
                return Err(RuntimeError::TypeMismatch { details: format!("Cannot assign an element of matrix '{name}'; element assignment needs a vector"),
                                                        line });
            },
            Some(_) => {
                return Err(RuntimeError::TypeMismatch { details: format!("Variable '{name}' is not an array"),
                                                        line });
            },
        };

        let number = value.numeric_part().ok_or_else(|| {
                                             RuntimeError::TypeMismatch { details: format!("Array assignment currently only supports numeric values (got {})",
                                                                                           value.describe()),
                                                                          line }
                                         })?;

        if index >= elements.len() {
            elements.resize(index + 1, 0.0);
        }
        elements[index] = number;
        self.env.define(name, Value::Array(ArrayValue::Vector { elements, column }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{error::ErrorKind, evaluate};

    fn run(body: &str) -> crate::EvaluationResult {
        evaluate(&format!("@version 0.01\n{body}"))
    }

    #[test]
    fn missing_array_becomes_zero_filled_column() {
        let result = run("v[2] := 5;\nprint(v);\nprint(type(v));");
        assert_eq!(result.outputs, vec!["[0; 0; 5]", "column_vector"]);
    }

    #[test]
    fn quantities_store_their_numeric_part() {
        let result = run("v := [1, 2];\nv[1] := 3 m;\nprint(v);");
        assert_eq!(result.outputs, vec!["[1, 3]"]);
    }

    #[test]
    fn negative_index_is_rejected() {
        let result = run("v[-1] := 5;");
        assert_eq!(result.error_kind, Some(ErrorKind::InvalidIndex));
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: Array index must be non-negative, got: -1"));
    }

    #[test]
    fn string_values_are_rejected_before_any_write() {
        let result = run("v := [1];\nv[3] := \"x\";");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 3: Array assignment currently only supports numeric values (got string: 'x')"));
    }

    #[test]
    fn scalar_target_is_not_an_array() {
        let result = run("v := 4;\nv[0] := 1;");
        assert_eq!(result.error.as_deref(), Some("Error on line 3: Variable 'v' is not an array"));
    }
}
