use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDecl, ImportItem, PiecewiseFunctionDecl, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_additive,
            block::{parse_block, parse_body},
            core::{ParseResult, parse_expression},
            unary::parse_piecewise_cases,
            utils::{expect, expect_terminator, parse_comma_separated, parse_identifier, peek_line},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `@version` directive or a decorated statement,
/// - a keyword statement (`fn`, `print`, `return`, `break`, `for`, `while`,
///   `if`, `from`, `import`),
/// - an element assignment, a variable assignment or a function definition,
/// - an expression used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. If none match, the input is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let Some((token, _)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { line });
    };

    match token {
        Token::Version(version) => {
            let version = version.clone();
            tokens.next();
            if let Some((Token::Semicolon, _)) = tokens.peek() {
                tokens.next();
            }
            return Ok(Statement::Version { version, line });
        },
        Token::Decorator(_) => return parse_decorated(tokens),
        Token::Fn => return parse_fn_declaration(tokens),
        Token::Print => {
            tokens.next();
            expect(tokens, &Token::LParen)?;
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            expect_terminator(tokens)?;
            return Ok(Statement::Print { expr, line });
        },
        Token::Return => {
            tokens.next();
            let value = match tokens.peek() {
                Some((Token::Semicolon | Token::RBrace, _)) | None => None,
                Some(_) => Some(parse_expression(tokens)?),
            };
            expect_terminator(tokens)?;
            return Ok(Statement::Return { value, line });
        },
        Token::Break => {
            tokens.next();
            expect_terminator(tokens)?;
            return Ok(Statement::Break { line });
        },
        Token::For => return parse_for(tokens),
        Token::While => {
            tokens.next();
            let condition = parse_expression(tokens)?;
            let body = parse_body(tokens)?;
            return Ok(Statement::While { condition, body, line });
        },
        Token::If => return parse_if(tokens),
        Token::From | Token::Import => return parse_import(tokens),
        _ => {},
    }

    if let Some(statement) = parse_array_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(statement);
    }

    let expr = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses one or more decorators and the statement they apply to.
///
/// Decorators at the end of a block or of the program wrap nothing and
/// become a [`Statement::Annotation`].
fn parse_decorated<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);
    let mut decorators = Vec::new();

    while let Some((Token::Decorator(name), _)) = tokens.peek() {
        decorators.push(name.clone());
        tokens.next();
    }

    match tokens.peek() {
        Some((Token::RBrace, _)) | None => Ok(Statement::Annotation { decorators, line }),
        Some(_) => {
            let statement = parse_statement(tokens)?;
            Ok(Statement::Decorated { decorators,
                                      statement: Box::new(statement),
                                      line })
        },
    }
}

/// Parses `fn name(params) { ... }`.
fn parse_fn_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Fn)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let params = parse_params(tokens, line)?;
    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDecl { name,
                                                  params,
                                                  body,
                                                  line })))
}

/// Parses a parameter list after its opening `(`.
///
/// # Errors
/// Returns `ParseError::InvalidFunctionDefinition` when a parameter is not a
/// plain identifier.
fn parse_params<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comma_separated(tokens, parse_identifier, &Token::RParen).map_err(|e| match e {
        ParseError::UnexpectedToken { .. } => ParseError::InvalidFunctionDefinition { line },
        other => other,
    })
}

/// Parses a `for` loop over an inclusive range.
///
/// Both `for i in 1...n { ... }` and `for (i in 1...n) body` are accepted.
///
/// Grammar:
/// ```text
///     for := "for" "("? IDENT "in" additive "..." additive ")"? body
/// ```
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::For)?;

    let parenthesized = matches!(tokens.peek(), Some((Token::LParen, _)));
    if parenthesized {
        tokens.next();
    }

    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::In)?;
    let start = parse_additive(tokens)?;
    match tokens.next() {
        Some((Token::Ellipsis, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::Other { message: format!("For loop requires a range expression (start...end), found '{tok}'"),
                                           line:    *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }
    let end = parse_additive(tokens)?;

    if parenthesized {
        expect(tokens, &Token::RParen)?;
    }
    let body = parse_body(tokens)?;

    Ok(Statement::For { var,
                        start,
                        end,
                        body,
                        line })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// An `else if` chain is stored as a nested `if` in the else branch.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If)?;
    let condition = parse_expression(tokens)?;
    let then_body = parse_body(tokens)?;

    let else_body = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        if let Some((Token::If, _)) = tokens.peek() {
            vec![parse_if(tokens)?]
        } else {
            parse_body(tokens)?
        }
    } else {
        Vec::new()
    };

    Ok(Statement::If { condition,
                       then_body,
                       else_body,
                       line })
}

/// Parses `from module import a, b as c;` and `import module;`.
///
/// The module is a string literal or a bare name.
fn parse_import<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens);

    let Some((keyword, _)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line });
    };
    let module = parse_module_name(tokens)?;

    let items = if *keyword == Token::From {
        expect(tokens, &Token::Import)?;
        let mut items = vec![parse_import_item(tokens)?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            items.push(parse_import_item(tokens)?);
        }
        Some(items)
    } else {
        None
    };
    expect_terminator(tokens)?;

    Ok(Statement::Import { module, items, line })
}

fn parse_module_name<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Str(path), _)) => Ok(path.clone()),
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected module name, found '{tok}'"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

fn parse_import_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ImportItem>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    let alias = if let Some((Token::As, _)) = tokens.peek() {
        tokens.next();
        Some(parse_identifier(tokens)?)
    } else {
        None
    };
    Ok(ImportItem { name, alias })
}

/// Parses an element assignment of the form `name[index] := value`.
///
/// If the input does not have that shape, the function returns `Ok(None)`
/// without consuming tokens.
fn parse_array_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    let Some((Token::Identifier(name), line)) = lookahead.next() else {
        return Ok(None);
    };
    if !matches!(lookahead.next(), Some((Token::LBracket, _))) {
        return Ok(None);
    }

    let mut depth = 1;
    while depth > 0 {
        match lookahead.next() {
            Some((Token::LBracket, _)) => depth += 1,
            Some((Token::RBracket, _)) => depth -= 1,
            Some(_) => {},
            None => return Ok(None),
        }
    }
    if !matches!(lookahead.peek(), Some((Token::Define, _))) {
        return Ok(None);
    }

    tokens.next();
    tokens.next();
    let index = parse_expression(tokens)?;
    expect(tokens, &Token::RBracket)?;
    expect(tokens, &Token::Define)?;
    let value = parse_expression(tokens)?;
    expect_terminator(tokens)?;

    Ok(Some(Statement::ArrayAssignment { name: name.clone(),
                                         index,
                                         value,
                                         line: *line }))
}

/// Parses an assignment statement `<identifier> := <expression>`.
///
/// If no assignment pattern matches, the function returns `Ok(None)` and does
/// not consume tokens.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    if let Some((Token::Identifier(name), line)) = lookahead.next()
       && let Some((Token::Define, _)) = lookahead.peek()
    {
        tokens.next();
        tokens.next();
        let value = parse_expression(tokens)?;
        expect_terminator(tokens)?;
        return Ok(Some(Statement::Assignment { name: name.clone(),
                                               value,
                                               line: *line }));
    }
    Ok(None)
}

/// Parses a function definition of the form `<name>(params) := <body>`.
///
/// This function identifies a definition by checking:
/// 1. The next token is an identifier.
/// 2. It is immediately followed by `(`.
/// 3. A matching `)` exists (nested parentheses are skipped).
/// 4. The token after the closing `)` is `:=`.
///
/// The body after `:=` is one of:
/// - a block `{ ... }`, giving a [`FunctionDecl`],
/// - `piecewise { ... }`, giving a [`PiecewiseFunctionDecl`],
/// - a single expression, which the function returns.
///
/// If the input does not match a function definition, the function returns
/// `Ok(None)` without consuming tokens.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a parameter is not an identifier,
/// - the body fails to parse,
/// - input ends unexpectedly.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    let Some((Token::Identifier(name), line)) = lookahead.next() else {
        return Ok(None);
    };
    let line = *line;
    if !matches!(lookahead.next(), Some((Token::LParen, _))) {
        return Ok(None);
    }

    let mut parens = 1;
    while parens > 0 {
        match lookahead.next() {
            Some((Token::LParen, _)) => parens += 1,
            Some((Token::RParen, _)) => parens -= 1,
            Some(_) => {},
            None => return Ok(None),
        }
    }
    if !matches!(lookahead.peek(), Some((Token::Define, _))) {
        return Ok(None);
    }

    tokens.next();
    tokens.next();
    let params = parse_params(tokens, line)?;
    expect(tokens, &Token::Define)?;
    let name = name.clone();

    match tokens.peek() {
        Some((Token::LBrace, _)) => {
            let body = parse_block(tokens)?;
            Ok(Some(Statement::Function(Rc::new(FunctionDecl { name,
                                                               params,
                                                               body,
                                                               line }))))
        },
        Some((Token::Piecewise, _)) => {
            tokens.next();
            let cases = parse_piecewise_cases(tokens)?;
            if let Some((Token::Semicolon, _)) = tokens.peek() {
                tokens.next();
            }
            Ok(Some(Statement::PiecewiseFunction(Rc::new(PiecewiseFunctionDecl { name,
                                                                                 params,
                                                                                 cases,
                                                                                 line }))))
        },
        _ => {
            let expr_line = peek_line(tokens);
            let expr = parse_expression(tokens)?;
            expect_terminator(tokens)?;
            let body = vec![Statement::Return { value: Some(expr),
                                                line:  expr_line, }];
            Ok(Some(Statement::Function(Rc::new(FunctionDecl { name,
                                                               params,
                                                               body,
                                                               line }))))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Expr, interpreter::parser::core::tokenize};

    fn parse_one(source: &str) -> Statement {
        let tokens = tokenize(source).unwrap();
        let mut iter = tokens.iter().peekable();
        parse_statement(&mut iter).unwrap()
    }

    #[test]
    fn expression_body_becomes_return() {
        let Statement::Function(decl) = parse_one("sq(x) := x * x;") else {
            panic!("expected a function");
        };
        assert_eq!(decl.params, vec!["x".to_string()]);
        assert!(matches!(decl.body.as_slice(), [Statement::Return { value: Some(_), .. }]));
    }

    #[test]
    fn bracketed_assignment_is_element_assignment() {
        assert!(matches!(parse_one("v[2] := 5;"), Statement::ArrayAssignment { .. }));
        assert!(matches!(parse_one("v[2];"),
                         Statement::Expression { expr: Expr::ArrayAccess { .. }, .. }));
    }

    #[test]
    fn trailing_decorator_is_annotation() {
        assert!(matches!(parse_one("@h1"), Statement::Annotation { .. }));
        assert!(matches!(parse_one("@gen_cpp x := 1;"), Statement::Decorated { .. }));
    }

    #[test]
    fn non_identifier_parameter_is_rejected() {
        let tokens = tokenize("f(1) := { return 1; }").unwrap();
        let mut iter = tokens.iter().peekable();
        assert!(matches!(parse_statement(&mut iter),
                         Err(ParseError::InvalidFunctionDefinition { line: 1 })));
    }
}
