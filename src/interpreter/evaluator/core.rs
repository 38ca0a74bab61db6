use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    ast::{Expr, PiecewiseFunctionDecl},
    config::InterpreterConfig,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        program::{Graph3dRecord, GraphRecord, TableRecord},
        units::registry::PREDEFINED_UNITS,
        value::{complex::ComplexNumber, core::Value, quantity::UnitValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A host function callable from MADOLA code.
///
/// It receives the evaluated arguments and the line of the call.
pub type NativeFn = Rc<dyn Fn(&[Value], usize) -> EvalResult<Value>>;

/// Stores the runtime state of one evaluation.
///
/// `Interpreter` owns the variable environment, the piecewise function
/// table, registered host functions, the call and loop depths that decide
/// whether `return` and `break` are legal, and everything a run produces:
/// printed output plus graph and table records.
///
/// Expression evaluation lives in the `evaluator` modules and statement
/// execution in the `executor` modules; both extend this type.
///
/// # Example
/// ```
/// use madola::{
///     ast::Expr,
///     config::InterpreterConfig,
///     interpreter::{evaluator::core::Interpreter, value::core::Value},
/// };
///
/// let mut interpreter = Interpreter::new(InterpreterConfig::default());
/// let expr = Expr::Number { value: 10.0,
///                           line:  1, };
/// assert_eq!(interpreter.eval(&expr).unwrap(), Value::Number(10.0));
/// ```
pub struct Interpreter {
    pub(crate) env:          Environment,
    pub(crate) piecewise:    HashMap<String, Rc<PiecewiseFunctionDecl>>,
    pub(crate) natives:      HashMap<String, NativeFn>,
    pub(crate) config:       InterpreterConfig,
    /// Nesting depth of user function calls in this interpreter.
    pub(crate) call_depth:   usize,
    /// Call depth of the interpreter that spawned this one for an import.
    pub(crate) depth_offset: usize,
    /// Nesting depth of loops in the current function body.
    pub(crate) loop_depth:   usize,
    pub(crate) outputs:      Vec<String>,
    pub(crate) graphs:       Vec<GraphRecord>,
    pub(crate) graphs_3d:    Vec<Graph3dRecord>,
    pub(crate) tables:       Vec<TableRecord>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
         .field("env", &self.env)
         .field("piecewise", &self.piecewise.keys().collect::<Vec<_>>())
         .field("natives", &self.natives.keys().collect::<Vec<_>>())
         .field("call_depth", &self.call_depth)
         .field("loop_depth", &self.loop_depth)
         .finish_non_exhaustive()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

impl Interpreter {
    /// Creates an interpreter whose global frame holds the predefined unit
    /// constants (`ft` is `1 ft`, `kN` is `1 kN`, ...).
    #[must_use]
    pub fn new(config: InterpreterConfig) -> Self {
        let mut env = Environment::new();
        for unit in PREDEFINED_UNITS {
            env.define(*unit, Value::Quantity(UnitValue::new(1.0, *unit)));
        }
        Self { env,
               piecewise: HashMap::new(),
               natives: HashMap::new(),
               config,
               call_depth: 0,
               depth_offset: 0,
               loop_depth: 0,
               outputs: Vec::new(),
               graphs: Vec::new(),
               graphs_3d: Vec::new(),
               tables: Vec::new() }
    }

    /// Creates the interpreter that evaluates an imported module.
    ///
    /// It shares the configuration and continues the importer's call-depth
    /// budget.
    pub(crate) fn for_import(&self) -> Self {
        let mut child = Self::new(self.config.clone());
        child.depth_offset = self.depth_offset + self.call_depth + 1;
        child
    }

    /// Returns the value bound to `name` in the global frame.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.env.lookup(name)
    }

    /// Returns the variable environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Returns the configuration this interpreter runs with.
    #[must_use]
    pub const fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Output lines produced so far.
    #[must_use]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Registers a host function.
    ///
    /// Natives are resolved after the built-in math functions and before
    /// piecewise and user functions.
    ///
    /// # Example
    /// ```
    /// use madola::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::default();
    /// interpreter.register_native("double", |args, _line| {
    ///                Ok(Value::Number(args.iter().filter_map(Value::numeric_part).sum::<f64>() * 2.0))
    ///            });
    /// let program = madola::parse_program("@version 0.01\nprint(double(21));").unwrap();
    /// assert_eq!(interpreter.run(&program).outputs, vec!["42"]);
    /// ```
    pub fn register_native<F>(&mut self, name: impl Into<String>, function: F)
        where F: Fn(&[Value], usize) -> EvalResult<Value> + 'static
    {
        self.natives.insert(name.into(), Rc::new(function));
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, variables, unary and
    /// binary operations, calls, method calls, substitutions, arrays, element
    /// access and piecewise expressions.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Str { value, .. } => Ok(Value::String(value.clone())),
            Expr::Imaginary { value, .. } => Ok(Value::Complex(ComplexNumber::new(0.0, *value))),
            Expr::Unit { value, unit, line } => match self.eval(value)? {
                Value::Number(n) => Ok(Value::Quantity(UnitValue::new(n, unit.as_str()))),
                _ => Err(RuntimeError::TypeMismatch { details: "Unit expressions require numeric values".to_string(),
                                                      line:    *line, }),
            },
            Expr::Variable { name, line } => self.env.get(name, *line).cloned(),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, *line),
            Expr::MethodCall { object,
                               method,
                               arguments,
                               line, } => self.eval_method_call(object, method, arguments, *line),
            Expr::Pipe { expr,
                         substitutions,
                         .. } => self.eval_pipe(expr, substitutions),
            Expr::ArrayLiteral { rows, layout, line } => self.eval_array_literal(rows, *layout, *line),
            Expr::ArrayAccess { name, index, line } => self.eval_array_access(name, index, *line),
            Expr::Piecewise { cases, .. } => self.eval_piecewise(cases),
        }
    }
}
