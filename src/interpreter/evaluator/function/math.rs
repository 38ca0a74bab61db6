use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::builtin::{checked_sqrt, numeric_argument},
            utils::{check_arity, integral_bound},
        },
        value::{array::ArrayValue, core::Value},
    },
};

/// Names answered by the `math` namespace.
pub const MATH_METHODS: &[&str] = &["summation", "sin", "cos", "tan", "sqrt", "sqr", "abs", "mod", "max", "min",
                                    "exp", "sum"];

/// The argument of a `math.*` function that accepts arrays.
enum Operand {
    Scalar(f64),
    Array(ArrayValue),
}

fn operand(name: &str, value: Value, line: usize) -> EvalResult<Operand> {
    match value {
        Value::Array(array) => Ok(Operand::Array(array)),
        other => other.numeric_part()
                      .map(Operand::Scalar)
                      .ok_or_else(|| RuntimeError::TypeMismatch { details: format!("Function {name} only supports numeric or array arguments"),
                                                                  line }),
    }
}

/// Folds an array with `pick`, or passes a scalar through.
fn extremum(name: &str, value: Value, pick: fn(f64, f64) -> f64, line: usize) -> EvalResult<Value> {
    match operand(name, value, line)? {
        Operand::Scalar(n) => Ok(Value::Number(n)),
        Operand::Array(array) => array.iter()
                                      .reduce(pick)
                                      .map(Value::Number)
                                      .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("Function {name} cannot operate on empty array"),
                                                                                     line }),
    }
}

/// Converts a summation bound, accepting the numeric part of quantities.
fn summation_bound(value: &Value, which: &str, line: usize) -> EvalResult<i32> {
    let what = format!("Summation {which} bound");
    let not_numeric = format!("{what} must be numeric");
    let Some(number) = value.numeric_part() else {
        return Err(RuntimeError::TypeMismatch { details: not_numeric,
                                                line });
    };
    integral_bound(&Value::Number(number), &what, &not_numeric, line)
}

impl Interpreter {
    /// Evaluates `math.<method>(...)`.
    ///
    /// `math.summation` receives its arguments unevaluated because the
    /// second one names the index variable. Every other method evaluates its
    /// arguments first.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    /// - `UndefinedFunction` for a method outside [`MATH_METHODS`].
    /// - The numeric errors of the individual methods.
    pub(crate) fn eval_math_method(&mut self, method: &str, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        let name = format!("math.{method}");
        if method == "summation" {
            return self.eval_summation(arguments, line);
        }
        if !MATH_METHODS.contains(&method) {
            return Err(RuntimeError::UndefinedFunction { name, line });
        }

        let expected = if method == "mod" { 2 } else { 1 };
        check_arity(&name, expected, arguments.len(), line)?;
        let mut args = arguments.iter()
                                .map(|arg| self.eval(arg))
                                .collect::<EvalResult<Vec<_>>>()?;
        let first = args.remove(0);

        match method {
            "sin" => Ok(Value::Number(numeric_argument(&name, &first, line)?.sin())),
            "cos" => Ok(Value::Number(numeric_argument(&name, &first, line)?.cos())),
            "tan" => Ok(Value::Number(numeric_argument(&name, &first, line)?.tan())),
            "abs" => Ok(Value::Number(numeric_argument(&name, &first, line)?.abs())),
            "mod" => {
                let a = numeric_argument(&name, &first, line)?;
                let b = numeric_argument(&name, &args[0], line)?;
                if b == 0.0 {
                    return Err(RuntimeError::ModuloByZero { line });
                }
                Ok(Value::Number(a % b))
            },
            "sqrt" => match operand(&name, first, line)? {
                Operand::Scalar(n) => checked_sqrt(n, line).map(Value::Number),
                Operand::Array(array) => array.try_map(|v| checked_sqrt(v, line)).map(Value::Array),
            },
            "sqr" => match operand(&name, first, line)? {
                Operand::Scalar(n) => Ok(Value::Number(n * n)),
                Operand::Array(array) => Ok(Value::Array(array.map(|v| v * v))),
            },
            "exp" => match operand(&name, first, line)? {
                Operand::Scalar(n) => Ok(Value::Number(n.exp())),
                Operand::Array(array) => Ok(Value::Array(array.map(f64::exp))),
            },
            "sum" => match operand(&name, first, line)? {
                Operand::Scalar(n) => Ok(Value::Number(n)),
                Operand::Array(array) => Ok(Value::Number(array.iter().sum())),
            },
            "max" => extremum(&name, first, f64::max, line),
            _ => extremum(&name, first, f64::min, line),
        }
    }

    /// Evaluates `math.summation(expr, var, lo, hi)`.
    ///
    /// `var` takes every integer from `lo` to `hi` inclusive. Each term must
    /// be a number or a quantity, whose numeric part is added. The prior
    /// binding of `var`, or its absence, is restored afterwards.
    fn eval_summation(&mut self, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        if arguments.len() != 4 {
            return Err(RuntimeError::ArgumentCountMismatch { details: format!("Function math.summation expects 4 arguments (expression, variable, lower_bound, upper_bound), got {}",
                                                                              arguments.len()),
                                                             line });
        }
        let Expr::Variable { name: var, .. } = &arguments[1] else {
            return Err(RuntimeError::TypeMismatch { details: "Second argument to math.summation must be a variable identifier".to_string(),
                                                    line });
        };

        let lower = self.eval(&arguments[2])?;
        let upper = self.eval(&arguments[3])?;
        let lower = summation_bound(&lower, "lower", line)?;
        let upper = summation_bound(&upper, "upper", line)?;
        trace!(variable = %var, lower, upper, "summation");

        let saved = self.env.remove(var);
        let result = self.sum_terms(&arguments[0], var, lower, upper, line);
        self.restore_binding(var, saved);
        result
    }

    fn sum_terms(&mut self, term: &Expr, var: &str, lower: i32, upper: i32, line: usize) -> EvalResult<Value> {
        let mut sum = 0.0;
        for i in lower..=upper {
            self.env.define(var, Value::Number(f64::from(i)));
            let value = self.eval(term)?;
            sum += value.numeric_part()
                        .ok_or_else(|| RuntimeError::TypeMismatch { details: "Summation expression must evaluate to numeric values".to_string(),
                                                                    line })?;
        }
        Ok(Value::Number(sum))
    }
}
