use tracing::trace;
use crate::language::lexer::{Token, TokenKind};
use crate::language::parser::{render, ParseError, ParseResult};

/// Splits a token sequence into top-level statement slices.
///
/// `;` at depth 0 ends a statement, as does the `}` that closes a depth 0 block unless
/// it is followed by `else`. An `if` at depth 0 always starts a new statement.
pub fn segment(tokens: &[Token]) -> ParseResult<Vec<&[Token]>> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut depth = 0;

    for (index, token) in tokens.iter().enumerate() {
        if depth == 0 && index > start && token.is(TokenKind::Conditional, "if") {
            statements.push(&tokens[start..index]);
            start = index;
        }

        if token.is(TokenKind::Punctuator, ";") && depth == 0 {
            statements.push(&tokens[start..=index]);
            start = index + 1;
        } else if token.is(TokenKind::Parenthesis, "{") {
            depth += 1;
        } else if token.is(TokenKind::Parenthesis, "}") {
            if depth == 0 {
                return Err(ParseError::unexpected(token));
            }

            depth -= 1;

            let followed_by_else = tokens.get(index + 1)
                .map_or(false, |next| next.is(TokenKind::Conditional, "else"));

            if depth == 0 && !followed_by_else {
                statements.push(&tokens[start..=index]);
                start = index + 1;
            }
        }
    }

    if depth > 0 {
        return Err(ParseError::UnclosedBlock { pos: *tokens[start].start() });
    }

    if start < tokens.len() {
        statements.push(&tokens[start..]);
    }

    if !statements.iter().any(|statement| is_terminated(statement)) {
        return Err(ParseError::NoValidCode);
    }

    for statement in &statements {
        if !is_terminated(statement) {
            return Err(ParseError::Unterminated {
                statement: render(statement),
                pos: *statement[0].start(),
            });
        }

        trace!(statement = %render(statement), "segmented");
    }

    Ok(statements)
}

fn is_terminated(statement: &[Token]) -> bool {
    statement.last().map_or(false, |last| {
        last.is(TokenKind::Punctuator, ";") || last.is(TokenKind::Parenthesis, "}")
    })
}
