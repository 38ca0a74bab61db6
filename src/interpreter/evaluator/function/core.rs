use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::builtin,
            utils::check_arity,
        },
        executor::core::ControlFlow,
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the exact number of arguments,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BUILTIN_TABLE` for lookup and the public
/// `BUILTIN_FUNCTIONS` name list.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of the built-in scalar functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "time" => { arity: 0, func: builtin::time },
    "sqrt" => { arity: 1, func: builtin::sqrt },
    "sin"  => { arity: 1, func: |args, line| builtin::trig("sin", f64::sin, args, line) },
    "cos"  => { arity: 1, func: |args, line| builtin::trig("cos", f64::cos, args, line) },
    "tan"  => { arity: 1, func: |args, line| builtin::trig("tan", f64::tan, args, line) },
}

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// `type`, `graph`, `graph_3d` and `table` look at their argument
    /// expressions and are handled before any argument is evaluated. Every
    /// other call evaluates its arguments left to right and goes through
    /// [`Interpreter::call_function`].
    pub(crate) fn eval_function_call(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        match name {
            "type" => return self.eval_type(arguments, line),
            "graph" => return self.eval_graph(arguments, line),
            "graph_3d" => return self.eval_graph_3d(arguments, line),
            "table" => return self.eval_table(arguments, line),
            _ => {},
        }

        let args = arguments.iter()
                            .map(|arg| self.eval(arg))
                            .collect::<EvalResult<Vec<_>>>()?;
        self.call_function(name, &args, line)
    }

    /// Calls a function by name with evaluated arguments.
    ///
    /// The name is resolved through the alias table first. Resolution then
    /// tries, in order: the builtin table, registered host functions,
    /// piecewise functions and user functions.
    ///
    /// # Errors
    /// - `UndefinedFunction` when nothing answers to the name.
    /// - `ArgumentCountMismatch` when the arity does not match.
    /// - Whatever the callee raises.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::default();
    /// let v = interpreter.call_function("sqrt", &[Value::Number(16.0)], 1).unwrap();
    /// assert_eq!(v, Value::Number(4.0));
    ///
    /// assert!(interpreter.call_function("nope", &[], 1).is_err());
    /// ```
    pub fn call_function(&mut self, name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
        let canonical = self.env.resolve_alias(name);

        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == canonical) {
            check_arity(builtin.name, builtin.arity, args.len(), line)?;
            return (builtin.func)(args, line);
        }

        if let Some(native) = self.natives.get(&canonical).cloned() {
            trace!(function = %canonical, "calling host function");
            return native(args, line);
        }

        if let Some(decl) = self.piecewise.get(&canonical).cloned() {
            return self.call_piecewise(&decl, args, line);
        }

        let decl = self.env
                       .lookup_function(&canonical)
                       .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                        line })?;
        self.call_user_function(&decl, args, line)
    }

    /// Fails once the nesting of user calls reaches the configured limit.
    ///
    /// Calls made by an imported module count against the importer's
    /// budget through `depth_offset`.
    pub(crate) fn check_call_depth(&self, line: usize) -> EvalResult<()> {
        let max = self.config.max_call_depth;
        if self.depth_offset + self.call_depth >= max {
            return Err(RuntimeError::RecursionLimit { depth: max,
                                                      line });
        }
        Ok(())
    }

    /// Runs a user function body in a fresh frame.
    ///
    /// The frame and the call and loop depths are restored on every exit
    /// path, including errors. A body that finishes without `return` yields
    /// `0`.
    fn call_user_function(&mut self, decl: &Rc<FunctionDecl>, args: &[Value], line: usize) -> EvalResult<Value> {
        check_arity(&decl.name, decl.params.len(), args.len(), line)?;
        self.check_call_depth(line)?;

        self.env.push_frame();
        for (param, value) in decl.params.iter().zip(args) {
            self.env.define(param.as_str(), value.clone());
        }
        self.call_depth += 1;
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        trace!(function = %decl.name, depth = self.call_depth, "entering user function");

        let outcome = ensure_sufficient_stack(|| self.exec_block(&decl.body));

        self.loop_depth = saved_loop_depth;
        self.call_depth -= 1;
        self.env.pop_frame();

        match outcome? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal => Ok(Value::Number(0.0)),
            ControlFlow::Break => Err(RuntimeError::ControlFlowMisuse { details: "Break statement outside of loop".to_string(),
                                                                        line }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::InterpreterConfig, parse_program};

    fn run(source: &str) -> Interpreter {
        let mut interpreter = Interpreter::new(InterpreterConfig { max_call_depth: 50,
                                                                   ..InterpreterConfig::default() });
        let program = parse_program(source).unwrap();
        let result = interpreter.run(&program);
        assert!(result.success, "{:?}", result.error);
        interpreter
    }

    #[test]
    fn builtin_names_are_listed() {
        assert_eq!(BUILTIN_FUNCTIONS, &["time", "sqrt", "sin", "cos", "tan"]);
    }

    #[test]
    fn user_function_without_return_yields_zero() {
        let interpreter = run("@version 0.01\nf(x) := { y := x; }\nr := f(3);");
        assert_eq!(interpreter.get_variable("r"), Some(&Value::Number(0.0)));
        assert_eq!(interpreter.get_variable("y"), None);
    }

    #[test]
    fn aliases_resolve_to_builtins() {
        let mut interpreter = Interpreter::default();
        interpreter.env.define_alias("root", "sqrt");
        let v = interpreter.call_function("root", &[Value::Number(9.0)], 1).unwrap();
        assert_eq!(v, Value::Number(3.0));
    }

    #[test]
    fn runaway_recursion_hits_the_limit() {
        let mut interpreter = Interpreter::new(InterpreterConfig { max_call_depth: 50,
                                                                   ..InterpreterConfig::default() });
        let program = parse_program("@version 0.01\nf(n) := { return f(n + 1); }\nx := f(0);").unwrap();
        let result = interpreter.run(&program);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(),
                   Some("Error on line 2: Maximum call depth of 50 exceeded"));
        assert_eq!(interpreter.call_depth, 0);
        assert_eq!(interpreter.env.depth(), 0);
    }

    #[test]
    fn natives_are_called_with_evaluated_arguments() {
        let mut interpreter = Interpreter::default();
        interpreter.register_native("twice", |args, line| {
                       let n = args[0].as_number("argument", line)?;
                       Ok(Value::Number(n * 2.0))
                   });
        let v = interpreter.call_function("twice", &[Value::Number(4.0)], 1).unwrap();
        assert_eq!(v, Value::Number(8.0));
    }
}
