use crate::language::ast::Node;
use crate::language::lexer::{Token, TokenKind, TokenPos};
use crate::language::parser::{ParseError, ParseResult};

/// Operator tiers from loosest to tightest binding.
const TIERS: [&[&str]; 3] = [
    &[">", "<"],
    &["+", "-"],
    &["*", "/"],
];

/// Builds a tree for an arithmetic or comparison expression.
///
/// The span is split at the right-most operator of the loosest tier found at parenthesis
/// depth 0, so chains associate to the left.
pub fn parse_expression(tokens: &[Token]) -> ParseResult<Node> {
    let first = match tokens.first() {
        Some(first) => first,
        None => return Err(ParseError::Missing { expected: "expression", pos: TokenPos::begin() }),
    };

    if first.is(TokenKind::Parenthesis, "(") && find_closing(tokens, 0) == Some(tokens.len() - 1) {
        return parse_expression(&tokens[1..tokens.len() - 1]);
    }

    for tier in TIERS {
        if let Some(index) = split_point(tokens, tier)? {
            let operator = &tokens[index];
            let left = parse_expression(&tokens[..index])?;
            let right = parse_expression(&tokens[index + 1..])
                .map_err(|err| missing_operand(err, operator))?;

            return Ok(Node::binary(left, operator.lexeme(), right, *operator.start()));
        }
    }

    match tokens {
        [single] => literal(single),
        [sign, number] if sign.is(TokenKind::Operator, "-") && number.kind() == TokenKind::NumberLiteral =>
            Ok(Node::literal(format!("-{}", number.lexeme()), TokenKind::NumberLiteral, *sign.start())),
        _ => Err(ParseError::unexpected(&tokens[1])),
    }
}

/// Wraps a single token as a literal node.
pub fn literal(token: &Token) -> ParseResult<Node> {
    match token.kind() {
        TokenKind::Identifier
        | TokenKind::NumberLiteral
        | TokenKind::StringLiteral
        | TokenKind::BooleanLiteral => Ok(Node::literal(token.lexeme(), token.kind(), *token.start())),
        _ => Err(ParseError::unexpected(token)),
    }
}

/// Index of the `)` matching the `(` at `open`.
pub fn find_closing(tokens: &[Token], open: usize) -> Option<usize> {
    find_matching(tokens, open, "(", ")")
}

pub fn find_matching(tokens: &[Token], open: usize, opening: &str, closing: &str) -> Option<usize> {
    let mut depth = 0;

    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.is(TokenKind::Parenthesis, opening) {
            depth += 1;
        } else if token.is(TokenKind::Parenthesis, closing) {
            depth -= 1;

            if depth == 0 {
                return Some(index);
            }
        }
    }

    None
}

fn split_point(tokens: &[Token], operators: &[&str]) -> ParseResult<Option<usize>> {
    let mut depth = 0;
    let mut found = None;

    for (index, token) in tokens.iter().enumerate() {
        if token.is(TokenKind::Parenthesis, "(") {
            depth += 1;
        } else if token.is(TokenKind::Parenthesis, ")") {
            depth -= 1;

            if depth < 0 {
                return Err(ParseError::unexpected(token));
            }
        } else if depth == 0 && token.kind() == TokenKind::Operator
            && operators.contains(&token.lexeme()) && is_binary_position(tokens, index) {
            found = Some(index);
        }
    }

    if depth != 0 {
        return Err(ParseError::Missing { expected: "')'", pos: *tokens[tokens.len() - 1].end() });
    }

    Ok(found)
}

// An operator at the start or right after another operator is a sign, not a binary operator
fn is_binary_position(tokens: &[Token], index: usize) -> bool {
    index > 0 && {
        let previous = &tokens[index - 1];
        previous.kind() != TokenKind::Operator && !previous.is(TokenKind::Parenthesis, "(")
    }
}

fn missing_operand(err: ParseError, operator: &Token) -> ParseError {
    match err {
        ParseError::Missing { expected: "expression", .. } =>
            ParseError::Missing { expected: "right operand", pos: *operator.end() },
        other => other,
    }
}
