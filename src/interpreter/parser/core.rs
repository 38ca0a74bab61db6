use std::iter::Peekable;

use logos::Logos;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{LexerExtras, Token},
        parser::{
            binary::parse_logical_or,
            statement::parse_statement,
            utils::{expect, parse_identifier},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Splits source text into `(token, line)` pairs.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for the first slice of input that is
/// not a valid token, such as an unterminated string.
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                     line:  lexer.extras.line, });
        }
    }

    Ok(tokens)
}

/// Parses a whole program.
///
/// Stray `;` tokens between statements are ignored.
///
/// # Example
/// ```
/// use madola::interpreter::parser::core::parse_program;
///
/// let program = parse_program("@version 0.01\nx := 2 + 3;").unwrap();
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while let Some((tok, _)) = iter.peek() {
        if *tok == Token::Semicolon {
            iter.next();
            continue;
        }
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and then accepts an optional pipe
/// that binds variables for the duration of the expression.
///
/// Grammar:
/// ```text
///     expression := logical_or ("|" IDENT ":" logical_or ("," IDENT ":" logical_or)*)?
/// ```
///
/// A comma only continues the substitution list when it is followed by
/// `IDENT ":"`, so pipes can appear inside argument lists.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_logical_or(tokens)?;

    let Some((Token::Pipe, line)) = tokens.peek() else {
        return Ok(expr);
    };
    let line = *line;
    tokens.next();

    let mut substitutions = Vec::new();
    loop {
        let name = parse_identifier(tokens)?;
        expect(tokens, &Token::Colon)?;
        substitutions.push((name, parse_logical_or(tokens)?));

        if !continues_substitutions(tokens) {
            break;
        }
        tokens.next();
    }

    Ok(Expr::Pipe { expr: Box::new(expr),
                    substitutions,
                    line })
}

fn continues_substitutions<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(lookahead.next(), Some((Token::Comma, _)))
    && matches!(lookahead.next(), Some((Token::Identifier(_), _)))
    && matches!(lookahead.next(), Some((Token::Colon, _)))
}
