use std::rc::Rc;

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers every expression form, from literals and variables to unit
/// literals, calls, method calls, arrays and piecewise expressions. Each
/// variant carries the source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3.5`.
    Number {
        /// The constant value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, stored without its quotes.
    Str {
        /// The literal text.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// An imaginary literal such as `3i`.
    Imaginary {
        /// The coefficient of `i`.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A number written with a unit, such as `5 kN` or `3 in^3`.
    Unit {
        /// The numeric part.
        value: Box<Self>,
        /// The unit symbol, with any exponent appended (`in3`).
        unit:  String,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `sqrt(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Method call expression (e.g. `A.det()` or `math.max(v)`).
    MethodCall {
        /// The receiver.
        object:    Box<Self>,
        /// Name of the method.
        method:    String,
        /// Arguments to the method.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Evaluates `expr` with temporary variable bindings: `f(x) | x: 2`.
    Pipe {
        /// The expression to evaluate.
        expr:          Box<Self>,
        /// Variables bound while evaluating `expr`, in order.
        substitutions: Vec<(String, Self)>,
        /// Line number in the source code.
        line:          usize,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// The element expressions, one inner list per row.
        rows:   Vec<Vec<Self>>,
        /// How the rows are interpreted.
        layout: ArrayLayout,
        /// Line number in the source code.
        line:   usize,
    },
    /// Array indexing expression (e.g. `v[2]`).
    ArrayAccess {
        /// The array variable.
        name:  String,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An ordered list of guarded cases.
    Piecewise {
        /// The cases, tried in order.
        cases: Vec<PiecewiseCase>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use madola::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Str { line, .. }
            | Self::Imaginary { line, .. }
            | Self::Unit { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::MethodCall { line, .. }
            | Self::Pipe { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::ArrayAccess { line, .. }
            | Self::Piecewise { line, .. } => *line,
        }
    }
}

/// How an array literal's rows are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLayout {
    /// `[1, 2, 3]`
    Row,
    /// `[1; 2; 3]`
    Column,
    /// `[1, 2; 3, 4]`
    Matrix,
}

/// One `(value, condition)` case of a piecewise expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseCase {
    /// The result when the case matches.
    pub value:     Expr,
    /// The guard, or `None` for `otherwise`.
    pub condition: Option<Expr>,
}

/// A user function with a statement body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// The statements executed when the function is called.
    pub body:   Vec<Statement>,
    /// Line number in the source code.
    pub line:   usize,
}

/// A user function whose body is a single piecewise expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseFunctionDecl {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// The cases, tried in order.
    pub cases:  Vec<PiecewiseCase>,
    /// Line number in the source code.
    pub line:   usize,
}

/// One name in `from module import a, b as c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    /// The function name inside the module.
    pub name:  String,
    /// The local alias, if any.
    pub alias: Option<String>,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `@version 0.01`
    Version {
        /// The declared version text.
        version: String,
        /// Line number in the source code.
        line:    usize,
    },
    /// A variable assignment `x := expr`.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// An element assignment `v[i] := expr`.
    ArrayAssignment {
        /// The name of the array.
        name:  String,
        /// The element index.
        index: Expr,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A user-defined function declaration.
    Function(Rc<FunctionDecl>),
    /// A piecewise function declaration.
    PiecewiseFunction(Rc<PiecewiseFunctionDecl>),
    /// `print(expr);`
    Print {
        /// The value to print.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `return expr;`
    Return {
        /// The returned value; a bare `return` yields 0.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `break;`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `for i in a...b { ... }`
    For {
        /// The loop variable name.
        var:   String,
        /// Inclusive start of the range.
        start: Expr,
        /// Inclusive end of the range.
        end:   Expr,
        /// The loop body.
        body:  Vec<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `while (cond) { ... }`
    While {
        /// Re-evaluated before each iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `if (cond) { ... } else { ... }`
    If {
        /// The condition.
        condition: Expr,
        /// Executed when the condition is true.
        then_body: Vec<Self>,
        /// Executed otherwise; empty when there is no `else`.
        else_body: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `from module import a, b as c;` or `import module;`
    Import {
        /// The module name as written.
        module: String,
        /// The requested functions; `None` imports all of them.
        items:  Option<Vec<ImportItem>>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A statement preceded by one or more `@decorator`s.
    Decorated {
        /// Decorator names without the `@`.
        decorators: Vec<String>,
        /// The wrapped statement.
        statement:  Box<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// Decorators with nothing to decorate.
    Annotation {
        /// Decorator names without the `@`.
        decorators: Vec<String>,
        /// Line number in the source code.
        line:       usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Function(decl) => decl.line,
            Self::PiecewiseFunction(decl) => decl.line,
            Self::Version { line, .. }
            | Self::Assignment { line, .. }
            | Self::ArrayAssignment { line, .. }
            | Self::Print { line, .. }
            | Self::Expression { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line }
            | Self::For { line, .. }
            | Self::While { line, .. }
            | Self::If { line, .. }
            | Self::Import { line, .. }
            | Self::Decorated { line, .. }
            | Self::Annotation { line, .. } => *line,
        }
    }
}

/// A parsed program: the top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// The statements.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and logical connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Unary plus (e.g. `+x`).
    Plus,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for Expr {
    /// Renders the expression back to source form. Used for table headers
    /// that are not plain strings or identifiers.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Imaginary { value, .. } => write!(f, "{value}i"),
            Self::Unit { value, unit, .. } => write!(f, "{value} {unit}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}({})", join_exprs(arguments, ", "))
            },
            Self::MethodCall { object,
                               method,
                               arguments,
                               .. } => write!(f, "{object}.{method}({})", join_exprs(arguments, ", ")),
            Self::Pipe { expr, substitutions, .. } => {
                let subs = substitutions.iter()
                                        .map(|(name, value)| format!("{name}: {value}"))
                                        .collect::<Vec<_>>()
                                        .join(", ");
                write!(f, "{expr} | {subs}")
            },
            Self::ArrayLiteral { rows, .. } => {
                let text = rows.iter().map(|row| join_exprs(row, ", ")).collect::<Vec<_>>().join("; ");
                write!(f, "[{text}]")
            },
            Self::ArrayAccess { name, index, .. } => write!(f, "{name}[{index}]"),
            Self::Piecewise { cases, .. } => {
                let cases = cases.iter()
                                 .map(|case| match &case.condition {
                                     Some(cond) => format!("({}, {cond})", case.value),
                                     None => format!("({}, otherwise)", case.value),
                                 })
                                 .collect::<Vec<_>>()
                                 .join(", ");
                write!(f, "piecewise {{{cases}}}")
            },
        }
    }
}

fn join_exprs(exprs: &[Expr], sep: &str) -> String {
    exprs.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
}
