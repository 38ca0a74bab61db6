use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A statement was not terminated by `;`.
    #[error("Error on line {line}: Expected ';' after statement, found {found}.")]
    ExpectedSemicolon {
        /// Description of what was found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The function definition syntax was invalid.
    #[error("Error on line {line}: Invalid function definition syntax. Example: f(x) := {{ return x * x; }}")]
    InvalidFunctionDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A unit literal used an exponent that is not an integer.
    #[error("Error on line {line}: Unit exponent must be an integer, found {found}.")]
    InvalidUnitExponent {
        /// The exponent text that was rejected.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Some other kind of parse error, with a custom message.
    #[error("Error on line {line}: {message}")]
    Other {
        /// Details about the parse error.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
