use serde::Serialize;
use thiserror::Error;

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Tried to read a variable that is not bound.
    #[error("Error on line {line}: Undefined variable: {name}")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither builtin, native nor user defined.
    #[error("Error on line {line}: Undefined function: {name}")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Shapes or unit dimensions do not agree.
    #[error("Error on line {line}: {details}")]
    DimensionMismatch {
        /// Description of both operands.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted modulo by zero.
    #[error("Error on line {line}: Modulo by zero")]
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operation received a value kind it does not support.
    #[error("Error on line {line}: {details}")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Inverse of a matrix whose determinant is (close to) zero.
    #[error("Error on line {line}: Matrix is singular (determinant is zero)")]
    Singular {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A feature that is recognised but not supported, such as complex
    /// eigenvalues.
    #[error("Error on line {line}: {details}")]
    Unsupported {
        /// What is unsupported.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// `return` outside a function or `break` outside a loop.
    #[error("Error on line {line}: {details}")]
    ControlFlowMisuse {
        /// Which statement was misplaced.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A module could not be found, read or evaluated.
    #[error("Error on line {line}: {details}")]
    ImportFailure {
        /// What went wrong while importing.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// `sqrt` of a negative number.
    #[error("Error on line {line}: Cannot take square root of negative number: {value:.6}")]
    NegativeSquareRoot {
        /// The rejected input.
        value: f64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The wrong number of arguments was supplied to a function or method.
    #[error("Error on line {line}: {details}")]
    ArgumentCountMismatch {
        /// Expected and actual argument counts.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: {details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An array index was fractional, negative or out of the `i32` range.
    #[error("Error on line {line}: {details}")]
    InvalidIndex {
        /// Details about the rejected index.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to read an array element past the end.
    #[error("Error on line {line}: Array index {index} out of bounds for array '{name}' (size: {size})")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The name of the array.
        name:  String,
        /// The number of elements in the array.
        size:  usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Loop or summation bounds are not integral numbers.
    #[error("Error on line {line}: {details}")]
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The program does not start with `@version`.
    #[error("Error on line {line}: Missing @version directive. Every MADOLA file must start with '@version' to specify the language version.")]
    MissingVersion {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The program declares a version this interpreter does not run.
    #[error("Error on line {line}: Unsupported version: {version}. Expected version 0.01")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// User function calls nested deeper than the configured limit.
    #[error("Error on line {line}: Maximum call depth of {depth} exceeded")]
    RecursionLimit {
        /// The configured maximum depth.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

/// Coarse category of a [`RuntimeError`].
///
/// Hosts and tests match on the kind rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UndefinedVariable,
    UndefinedFunction,
    DimensionMismatch,
    DivisionByZero,
    ModuloByZero,
    TypeMismatch,
    Singular,
    Unsupported,
    ControlFlowMisuse,
    ImportFailure,
    NegativeSquareRoot,
    ArgumentCountMismatch,
    InvalidArgument,
    InvalidIndex,
    IndexOutOfBounds,
    InvalidLoopBounds,
    MissingVersion,
    UnsupportedVersion,
    RecursionLimit,
}

impl RuntimeError {
    /// Returns the category of this error.
    ///
    /// # Example
    /// ```
    /// use madola::error::{ErrorKind, RuntimeError};
    ///
    /// let err = RuntimeError::DivisionByZero { line: 3 };
    /// assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    /// assert_eq!(err.to_string(), "Error on line 3: Division by zero");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            Self::UndefinedFunction { .. } => ErrorKind::UndefinedFunction,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::ModuloByZero { .. } => ErrorKind::ModuloByZero,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Singular { .. } => ErrorKind::Singular,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::ControlFlowMisuse { .. } => ErrorKind::ControlFlowMisuse,
            Self::ImportFailure { .. } => ErrorKind::ImportFailure,
            Self::NegativeSquareRoot { .. } => ErrorKind::NegativeSquareRoot,
            Self::ArgumentCountMismatch { .. } => ErrorKind::ArgumentCountMismatch,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::InvalidLoopBounds { .. } => ErrorKind::InvalidLoopBounds,
            Self::MissingVersion { .. } => ErrorKind::MissingVersion,
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::RecursionLimit { .. } => ErrorKind::RecursionLimit,
        }
    }

    /// Returns the source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::DimensionMismatch { line, .. }
            | Self::DivisionByZero { line }
            | Self::ModuloByZero { line }
            | Self::TypeMismatch { line, .. }
            | Self::Singular { line }
            | Self::Unsupported { line, .. }
            | Self::ControlFlowMisuse { line, .. }
            | Self::ImportFailure { line, .. }
            | Self::NegativeSquareRoot { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::InvalidArgument { line, .. }
            | Self::InvalidIndex { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::InvalidLoopBounds { line, .. }
            | Self::MissingVersion { line }
            | Self::UnsupportedVersion { line, .. }
            | Self::RecursionLimit { line, .. } => *line,
        }
    }
}
