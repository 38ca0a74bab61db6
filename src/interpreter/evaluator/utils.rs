use crate::{
    ast::{ArrayLayout, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{array::ArrayValue, core::Value},
    },
    util::num::{f64_to_i32_checked, format_fixed6},
};

/// Checks that a call received the expected number of arguments.
///
/// # Example
/// ```
/// use madola::interpreter::evaluator::utils::check_arity;
///
/// assert!(check_arity("sqrt", 1, 1, 1).is_ok());
/// let err = check_arity("sqrt", 1, 2, 7).unwrap_err();
/// assert_eq!(err.to_string(), "Error on line 7: Function sqrt expects 1 argument, got 2");
/// ```
pub fn check_arity(name: &str, expected: usize, got: usize, line: usize) -> EvalResult<()> {
    if expected == got {
        return Ok(());
    }
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Err(RuntimeError::ArgumentCountMismatch { details: format!("Function {name} expects {expected} {noun}, got {got}"),
                                              line })
}

/// Converts a loop or summation bound to an `i32`.
///
/// `what` names the bound in the messages, for example
/// `For loop start value`.
///
/// # Errors
/// - `TypeMismatch` with `not_numeric` when the value is not a number.
/// - `InvalidLoopBounds` when it is fractional or outside the `i32` range.
///
/// # Example
/// ```
/// use madola::interpreter::{evaluator::utils::integral_bound, value::core::Value};
///
/// let bound = integral_bound(&Value::Number(3.0), "Summation lower bound", "not numeric", 1);
/// assert_eq!(bound.unwrap(), 3);
///
/// let err = integral_bound(&Value::Number(1.5), "Summation lower bound", "not numeric", 1);
/// assert_eq!(err.unwrap_err().to_string(),
///            "Error on line 1: Summation lower bound must be an integer, got: 1.500000");
/// ```
pub fn integral_bound(value: &Value, what: &str, not_numeric: &str, line: usize) -> EvalResult<i32> {
    let Value::Number(n) = value else {
        return Err(RuntimeError::TypeMismatch { details: not_numeric.to_string(),
                                                line });
    };
    let shown = format_fixed6(*n);
    f64_to_i32_checked(*n,
                       RuntimeError::InvalidLoopBounds { details: format!("{what} must be an integer, got: {shown}"),
                                                         line },
                       RuntimeError::InvalidLoopBounds { details: format!("{what} out of valid range: {shown}"),
                                                         line })
}

/// Converts an index value to an `i32`, before any sign check.
pub(crate) fn array_index(value: &Value, line: usize) -> EvalResult<i32> {
    let Value::Number(n) = value else {
        return Err(RuntimeError::TypeMismatch { details: "Array index must be a number".to_string(),
                                                line });
    };
    let shown = format_fixed6(*n);
    f64_to_i32_checked(*n,
                       RuntimeError::InvalidIndex { details: format!("Array index must be an integer, got: {shown}"),
                                                    line },
                       RuntimeError::InvalidIndex { details: format!("Array index out of valid range: {shown}"),
                                                    line })
}

/// Describes a rejected array literal element.
fn element_kind(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string: '{s}'"),
        Value::Quantity(_) => "unit value".to_string(),
        Value::Array(_) => "nested array".to_string(),
        Value::Number(_) | Value::Complex(_) => "unknown type".to_string(),
    }
}

impl Interpreter {
    /// Evaluates an array literal.
    ///
    /// Every element must evaluate to a plain number. The layout chosen by
    /// the parser decides between a row vector, a column vector and a
    /// matrix.
    pub(crate) fn eval_array_literal(&mut self,
                                     rows: &[Vec<Expr>],
                                     layout: ArrayLayout,
                                     line: usize)
                                     -> EvalResult<Value> {
        let label = if layout == ArrayLayout::Matrix { "Matrix" } else { "Array" };
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let mut numbers = Vec::with_capacity(row.len());
            for element in row {
                match self.eval(element)? {
                    Value::Number(n) => numbers.push(n),
                    other => {
                        return Err(RuntimeError::TypeMismatch { details: format!("{label} elements must be numeric (got {})",
                                                                                 element_kind(&other)),
                                                                line });
                    },
                }
            }
            values.push(numbers);
        }

        let array = match layout {
            ArrayLayout::Row => ArrayValue::row(values.into_iter().flatten().collect()),
            ArrayLayout::Column => ArrayValue::column(values.into_iter().flatten().collect()),
            ArrayLayout::Matrix => ArrayValue::Matrix(values),
        };
        Ok(Value::Array(array))
    }

    /// Reads `name[index]` with zero-based indexing.
    ///
    /// Indexing a matrix returns the selected row as a row vector.
    pub(crate) fn eval_array_access(&mut self, name: &str, index: &Expr, line: usize) -> EvalResult<Value> {
        let array = match self.env.get(name, line)? {
            Value::Array(array) => array.clone(),
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("Variable '{name}' is not an array"),
                                                        line });
            },
        };

        let index = array_index(&self.eval(index)?, line)?;
        let Ok(index) = usize::try_from(index) else {
            return Err(RuntimeError::InvalidIndex { details: format!("Array index must be non-negative, got: {index} for array '{name}'"),
                                                    line });
        };

        let out_of_bounds = |size| RuntimeError::IndexOutOfBounds { index,
                                                                    name: name.to_string(),
                                                                    size,
                                                                    line };
        match array {
            ArrayValue::Vector { elements, .. } => elements.get(index)
                                                           .map(|v| Value::Number(*v))
                                                           .ok_or_else(|| out_of_bounds(elements.len())),
            ArrayValue::Matrix(rows) => rows.get(index)
                                            .map(|row| Value::Array(ArrayValue::row(row.clone())))
                                            .ok_or_else(|| out_of_bounds(rows.len())),
        }
    }

    /// Evaluates `expr | a: 1, b: 2` with the substitutions bound.
    ///
    /// The prior bindings are restored afterwards, also when evaluation
    /// fails, and names that were unbound before are removed again.
    pub(crate) fn eval_pipe(&mut self, expr: &Expr, substitutions: &[(String, Expr)]) -> EvalResult<Value> {
        let mut saved = Vec::with_capacity(substitutions.len());
        let result = self.bind_substitutions(substitutions, &mut saved)
                         .and_then(|()| self.eval(expr));
        self.restore_bindings(saved);
        result
    }

    fn bind_substitutions(&mut self,
                          substitutions: &[(String, Expr)],
                          saved: &mut Vec<(String, Option<Value>)>)
                          -> EvalResult<()> {
        for (name, value_expr) in substitutions {
            let value = self.eval(value_expr)?;
            saved.push((name.clone(), self.env.remove(name)));
            self.env.define(name.as_str(), value);
        }
        Ok(())
    }

    /// Puts back bindings saved by a substitution, last one first.
    pub(crate) fn restore_bindings(&mut self, saved: Vec<(String, Option<Value>)>) {
        for (name, prior) in saved.into_iter().rev() {
            self.restore_binding(&name, prior);
        }
    }

    /// Rebinds `name` to `prior`, or removes it when it was unbound.
    pub(crate) fn restore_binding(&mut self, name: &str, prior: Option<Value>) {
        match prior {
            Some(value) => self.env.define(name, value),
            None => {
                self.env.remove(name);
            },
        }
    }
}
