use tracing::trace;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::integral_bound,
        },
        executor::core::ControlFlow,
        value::core::Value,
    },
};

/// What a loop does after one pass over its body.
enum Step {
    Continue,
    Exit(ControlFlow),
}

/// Maps the outcome of a loop body: `break` ends the loop normally and
/// `return` ends it and keeps propagating.
fn step(flow: ControlFlow) -> Step {
    match flow {
        ControlFlow::Normal => Step::Continue,
        ControlFlow::Break => Step::Exit(ControlFlow::Normal),
        ControlFlow::Return(value) => Step::Exit(ControlFlow::Return(value)),
    }
}

impl Interpreter {
    /// Runs `body` with the loop depth raised by one, restoring it on every
    /// exit path.
    fn with_loop<T>(&mut self, body: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        self.loop_depth += 1;
        let result = body(self);
        self.loop_depth -= 1;
        result
    }

    /// Executes `for var in start...end body` over an inclusive integer
    /// range.
    ///
    /// The loop variable's prior binding, or its absence, is restored when
    /// the loop ends, also when it ends with an error.
    ///
    /// # Errors
    /// - `TypeMismatch` when a bound is not a number.
    /// - `InvalidLoopBounds` when a bound is fractional or outside `i32`.
    pub(crate) fn exec_for(&mut self,
                           var: &str,
                           start: &Expr,
                           end: &Expr,
                           body: &[Statement],
                           line: usize)
                           -> EvalResult<ControlFlow> {
        let start = self.eval(start)?;
        let end = self.eval(end)?;
        if !matches!((&start, &end), (Value::Number(_), Value::Number(_))) {
            return Err(RuntimeError::TypeMismatch { details: "Range values must be numbers".to_string(),
                                                    line });
        }
        let not_numeric = "Range values must be numbers";
        let start = integral_bound(&start, "For loop start value", not_numeric, line)?;
        let end = integral_bound(&end, "For loop end value", not_numeric, line)?;
        trace!(variable = var, start, end, "for loop");

        let saved = self.env.remove(var);
        let result = self.with_loop(|this| {
                             for i in start..=end {
                                 this.env.define(var, Value::Number(f64::from(i)));
                                 if let Step::Exit(flow) = step(this.exec_block(body)?) {
                                     return Ok(flow);
                                 }
                             }
                             Ok(ControlFlow::Normal)
                         });
        self.restore_binding(var, saved);
        result
    }

    /// Executes `while (condition) body`.
    ///
    /// The condition is evaluated before every pass. Nonzero numbers,
    /// nonempty strings and nonzero quantities are true.
    ///
    /// # Errors
    /// `TypeMismatch` when the condition is a complex number or an array.
    pub(crate) fn exec_while(&mut self, condition: &Expr, body: &[Statement], line: usize) -> EvalResult<ControlFlow> {
        self.with_loop(|this| {
                loop {
                    let holds = this.eval(condition)?.truthiness().ok_or_else(|| {
                                    RuntimeError::TypeMismatch { details: "While condition must evaluate to a number or compatible type".to_string(),
                                                                 line }
                                })?;
                    if !holds {
                        return Ok(ControlFlow::Normal);
                    }
                    if let Step::Exit(flow) = step(this.exec_block(body)?) {
                        return Ok(flow);
                    }
                }
            })
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
    fn for_loop_is_inclusive_and_restores_the_variable() {
        let result = run("i := 42;\nfor (i in 1...3) print(i);\nprint(i);");
        assert_eq!(result.outputs, vec!["1", "2", "3", "42"]);
    }

    #[test]
    fn for_loop_removes_a_fresh_variable() {
        let result = run("for i in 1...2 { }\nprint(i);");
        assert_eq!(result.error_kind, Some(ErrorKind::UndefinedVariable));
    }

    #[test]
    fn empty_range_skips_the_body() {
        let result = run("for i in 3...1 { print(i); }\nprint(\"done\");");
        assert_eq!(result.outputs, vec!["done"]);
    }

    #[test]
    fn break_leaves_the_innermost_loop() {
        let result = run("for i in 1...3 {\n  for j in 1...3 {\n    if (j == 2) { break; }\n    print(i * 10 + j);\n  }\n}");
        assert_eq!(result.outputs, vec!["11", "21", "31"]);
    }

    #[test]
    fn fractional_bounds_are_rejected() {
        let result = run("for i in 1.5...3 { }");
        assert_eq!(result.error_kind, Some(ErrorKind::InvalidLoopBounds));
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: For loop start value must be an integer, got: 1.500000"));
    }

    #[test]
    fn while_loop_runs_until_condition_fails() {
        let result = run("n := 0;\nwhile (n < 3) { n := n + 1; }\nprint(n);");
        assert_eq!(result.outputs, vec!["3"]);
    }

    #[test]
    fn while_condition_must_be_scalar() {
        let result = run("while ([1]) { break; }");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: While condition must evaluate to a number or compatible type"));
    }
}
