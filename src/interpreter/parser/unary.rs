use std::iter::Peekable;

use crate::{
    ast::{ArrayLayout, Expr, PiecewiseCase, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
        units::is_valid_unit,
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (no-op)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`. Without an operator the function delegates to [`parse_power`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "!") unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a power-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        Some((Token::Bang, _)) => UnaryOperator::Not,
        _ => return parse_power(tokens),
    };
    let line = tokens.next().map_or(0, |(_, line)| *line);
    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line })
}

/// Parses a primary expression followed by any `.method(args)` calls.
///
/// Grammar:
/// ```text
///     postfix := primary ("." IDENT "(" args ")")*
/// ```
pub(crate) fn parse_postfix_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_primary(tokens)?;

    while let Some((Token::Dot, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let method = parse_identifier(tokens)?;
        expect(tokens, &Token::LParen)?;
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        node = Expr::MethodCall { object: Box::new(node),
                                  method,
                                  arguments,
                                  line };
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Grammar (simplified):
/// ```text
///     primary := number_literal
///              | STRING
///              | identifier_or_call
///              | "in"
///              | "(" expression ")"
///              | "[" rows "]"
///              | piecewise
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Number(_), _) => parse_number_literal(tokens),
        (Token::Str(value), line) => {
            let expr = Expr::Str { value: value.clone(),
                                   line:  *line, };
            tokens.next();
            Ok(expr)
        },
        (Token::In, line) => {
            let expr = Expr::Variable { name: "in".to_string(),
                                        line: *line, };
            tokens.next();
            Ok(expr)
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::Piecewise, line) => {
            let line = *line;
            tokens.next();
            let cases = parse_piecewise_cases(tokens)?;
            Ok(Expr::Piecewise { cases, line })
        },
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                         line:  *line, }),
    }
}

/// Parses a numeric literal and the suffix that may follow it.
///
/// - `3i` or `3 j` is an imaginary literal.
/// - `5 kN`, `2 in` or `3 in^3` is a unit literal. An exponent is appended
///   to the symbol, so `in^3` becomes `in3`.
/// - Anything else leaves the plain number.
///
/// # Errors
/// Returns `ParseError::InvalidUnitExponent` when a unit is raised to a
/// non-integer literal.
fn parse_number_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Number(value), line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let (value, line) = (*value, *line);
    let number = Expr::Number { value, line };

    let mut unit = match tokens.peek() {
        Some((Token::Identifier(id), _)) if id == "i" || id == "j" => {
            tokens.next();
            return Ok(Expr::Imaginary { value, line });
        },
        Some((Token::Identifier(id), _)) if is_valid_unit(id) => id.clone(),
        Some((Token::In, _)) => "in".to_string(),
        _ => return Ok(number),
    };
    tokens.next();

    let mut lookahead = tokens.clone();
    if let Some((Token::Caret, _)) = lookahead.next()
       && let Some((Token::Number(exponent), exp_line)) = lookahead.next()
    {
        if exponent.fract() != 0.0 {
            return Err(ParseError::InvalidUnitExponent { found: exponent.to_string(),
                                                         line:  *exp_line, });
        }
        tokens.next();
        tokens.next();
        unit.push_str(&exponent.to_string());
    }

    Ok(Expr::Unit { value: Box::new(number),
                    unit,
                    line })
}

/// Parses a parenthesized expression.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    Ok(expr)
}

/// Parses a variable reference, a function call or an element access.
///
/// Grammar:
/// ```text
///     identifier_or_call := IDENT
///                         | IDENT "(" args ")"
///                         | IDENT "[" expression "]"
/// ```
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, line)| *line);
    let name = parse_identifier(tokens)?;

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Expr::FunctionCall { name,
                                    arguments,
                                    line })
        },
        Some((Token::LBracket, _)) => {
            tokens.next();
            let index = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket)?;
            Ok(Expr::ArrayAccess { name,
                                   index: Box::new(index),
                                   line })
        },
        _ => Ok(Expr::Variable { name, line }),
    }
}

/// Parses an array literal.
///
/// Commas separate the elements of a row and semicolons separate rows. A
/// single row is a row vector, rows of one element each form a column
/// vector, and anything else is a matrix whose rows must be equally long.
///
/// Grammar:
/// ```text
///     array := "[" "]" | "[" row (";" row)* "]"
///     row   := expression ("," expression)*
/// ```
///
/// # Errors
/// Returns a `ParseError` if the brackets do not match or matrix rows differ
/// in length.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBracket)?;

    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::ArrayLiteral { rows: Vec::new(),
                                       layout: ArrayLayout::Row,
                                       line });
    }

    let mut rows = vec![vec![parse_expression(tokens)?]];
    loop {
        match tokens.next() {
            Some((Token::Comma, _)) => {
                let element = parse_expression(tokens)?;
                if let Some(row) = rows.last_mut() {
                    row.push(element);
                }
            },
            Some((Token::Semicolon, _)) => rows.push(vec![parse_expression(tokens)?]),
            Some((Token::RBracket, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("expected ',', ';' or ']', found '{tok}'"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    let layout = if rows.len() == 1 {
        ArrayLayout::Row
    } else if rows.iter().all(|row| row.len() == 1) {
        ArrayLayout::Column
    } else {
        let width = rows[0].len();
        if rows.iter().any(|row| row.len() != width) {
            return Err(ParseError::Other { message: "Matrix rows must have the same number of elements".to_string(),
                                           line });
        }
        ArrayLayout::Matrix
    };

    Ok(Expr::ArrayLiteral { rows, layout, line })
}

/// Parses the `{ (value, condition), ... }` part of a piecewise expression.
///
/// A case whose condition is the keyword `otherwise` always matches.
///
/// Grammar:
/// ```text
///     piecewise := "piecewise" "{" case ("," case)* "}"
///     case      := "(" expression "," (expression | "otherwise") ")"
/// ```
pub(in crate::interpreter::parser) fn parse_piecewise_cases<'a, I>(
    tokens: &mut Peekable<I>)
    -> ParseResult<Vec<PiecewiseCase>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBrace)?;
    parse_comma_separated(tokens, parse_piecewise_case, &Token::RBrace)
}

fn parse_piecewise_case<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<PiecewiseCase>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &Token::Comma)?;

    let condition = if let Some((Token::Otherwise, _)) = tokens.peek() {
        tokens.next();
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::RParen)?;

    Ok(PiecewiseCase { value, condition })
}
