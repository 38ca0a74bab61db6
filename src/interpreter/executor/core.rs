use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

/// Decorators whose statement exists for code generation only and is not
/// executed.
pub const GENERATE_ONLY_DECORATORS: &[&str] = &["gen_cpp", "gen_addon"];

/// How a statement finished.
///
/// `Return` and `Break` travel up through enclosing blocks until a function
/// call or a loop consumes them.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Continue with the next statement.
    Normal,
    /// A `return` fired with this value.
    Return(Value),
    /// A `break` fired.
    Break,
}

impl ControlFlow {
    /// Returns `true` unless a `return` or `break` is propagating.
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl Interpreter {
    /// Executes statements in order until one of them returns or breaks.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<ControlFlow> {
        for statement in statements {
            let flow = self.exec_statement(statement)?;
            if !flow.is_normal() {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// Any error raised while evaluating the statement's expressions, plus
    /// `ControlFlowMisuse` for `return` outside a function and `break`
    /// outside a loop.
    ///
    /// # Example
    /// ```
    /// use madola::{
    ///     ast::{Expr, Statement},
    ///     interpreter::{evaluator::core::Interpreter, executor::core::ControlFlow, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::default();
    /// let stmt = Statement::Assignment { name:  "x".to_string(),
    ///                                    value: Expr::Number { value: 2.0, line: 1 },
    ///                                    line:  1, };
    /// assert_eq!(interpreter.exec_statement(&stmt).unwrap(), ControlFlow::Normal);
    /// assert_eq!(interpreter.get_variable("x"), Some(&Value::Number(2.0)));
    /// ```
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<ControlFlow> {
        trace!(line = statement.line_number(), "executing statement");
        match statement {
            Statement::Version { .. } | Statement::Annotation { .. } => Ok(ControlFlow::Normal),
            Statement::Assignment { name, value, .. } => {
                self.exec_assignment(name, value)?;
                Ok(ControlFlow::Normal)
            },
            Statement::ArrayAssignment { name,
                                         index,
                                         value,
                                         line, } => {
                self.exec_array_assignment(name, index, value, *line)?;
                Ok(ControlFlow::Normal)
            },
            Statement::Function(decl) => {
                debug!(function = %decl.name, params = decl.params.len(), "declaring function");
                self.piecewise.remove(&decl.name);
                self.env.define_function(Rc::clone(decl));
                Ok(ControlFlow::Normal)
            },
            Statement::PiecewiseFunction(decl) => {
                debug!(function = %decl.name, cases = decl.cases.len(), "declaring piecewise function");
                self.piecewise.insert(decl.name.clone(), Rc::clone(decl));
                Ok(ControlFlow::Normal)
            },
            Statement::Print { expr, .. } => {
                let value = self.eval(expr)?;
                self.outputs.push(value.to_string());
                Ok(ControlFlow::Normal)
            },
            Statement::Expression { expr, .. } => {
                if let Value::String(text) = self.eval(expr)?
                   && !text.is_empty()
                {
                    self.outputs.push(text);
                }
                Ok(ControlFlow::Normal)
            },
            Statement::Return { value, line } => {
                if self.call_depth == 0 {
                    return Err(RuntimeError::ControlFlowMisuse { details: "Return statement outside of function".to_string(),
                                                                 line:    *line, });
                }
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Number(0.0),
                };
                Ok(ControlFlow::Return(value))
            },
            Statement::Break { line } => {
                if self.loop_depth == 0 {
                    return Err(RuntimeError::ControlFlowMisuse { details: "Break statement outside of loop".to_string(),
                                                                 line:    *line, });
                }
                Ok(ControlFlow::Break)
            },
            Statement::For { var,
                             start,
                             end,
                             body,
                             line, } => self.exec_for(var, start, end, body, *line),
            Statement::While { condition, body, line } => self.exec_while(condition, body, *line),
            Statement::If { condition,
                            then_body,
                            else_body,
                            .. } => {
                let taken = self.eval(condition)?.truthiness().unwrap_or(false);
                self.exec_block(if taken { then_body } else { else_body })
            },
            Statement::Import { module, items, line } => {
                self.exec_import(module, items.as_deref(), *line)?;
                Ok(ControlFlow::Normal)
            },
            Statement::Decorated { decorators,
                                   statement,
                                   .. } => {
                if let Some(decorator) = decorators.iter()
                                                   .find(|d| GENERATE_ONLY_DECORATORS.contains(&d.as_str()))
                {
                    debug!(%decorator, line = statement.line_number(), "skipping generate-only statement");
                    return Ok(ControlFlow::Normal);
                }
                self.exec_statement(statement)
            },
        }
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
    fn return_outside_function_is_misuse() {
        let result = run("return 1;");
        assert_eq!(result.error_kind, Some(ErrorKind::ControlFlowMisuse));
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: Return statement outside of function"));
    }

    #[test]
    fn break_inside_function_body_outside_loop_is_misuse() {
        let result = run("f() := { break; }\nfor i in 1...2 { x := f(); }");
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: Break statement outside of loop"));
    }

    #[test]
    fn return_propagates_out_of_nested_blocks() {
        let result = run("f(n) := {\n  for i in 1...10 {\n    if (i == n) { return i * 100; }\n  }\n  return -1;\n}\nprint(f(3));\nprint(f(20));");
        assert_eq!(result.outputs, vec!["300", "-1"]);
    }

    #[test]
    fn if_treats_arrays_as_false() {
        let result = run("if ([1, 2]) { print(\"yes\"); } else { print(\"no\"); }");
        assert_eq!(result.outputs, vec!["no"]);
    }

    #[test]
    fn generate_only_decorators_skip_execution() {
        let result = run("@gen_cpp\nprint(1);\n@h1\nprint(2);");
        assert_eq!(result.outputs, vec!["2"]);
    }

    #[test]
    fn expression_statements_output_non_empty_strings() {
        let result = run("\"shown\";\n\"\";\n5;");
        assert_eq!(result.outputs, vec!["shown"]);
    }

    #[test]
    fn redeclaring_a_piecewise_function_as_regular_replaces_it() {
        let result = run("f(x) := piecewise { (1, otherwise) };\nf(x) := { return 2; }\nprint(f(0));");
        assert_eq!(result.outputs, vec!["2"]);
    }
}
