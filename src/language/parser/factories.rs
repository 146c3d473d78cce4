use lazy_static::lazy_static;
use crate::language::ast::Node;
use crate::language::lexer::{Token, TokenKind, TokenPos};
use crate::language::parser::expression::{find_closing, find_matching, literal, parse_expression};
use crate::language::parser::{ParseError, ParseResult, Parser};
use crate::language::version::GrammarVersion;

/// A `(predicate, builder)` pair; the first factory whose predicate accepts a statement builds it.
pub struct NodeFactory {
    pub name: &'static str,
    pub can_handle: fn(&[Token]) -> bool,
    pub build: fn(&Parser, &[Token]) -> ParseResult<Node>,
}

const CONDITIONAL: NodeFactory = NodeFactory { name: "conditional", can_handle: is_conditional, build: build_conditional };
const PRINTLN: NodeFactory = NodeFactory { name: "println", can_handle: is_println, build: build_println };
const DECLARATION: NodeFactory = NodeFactory { name: "declaration", can_handle: is_declaration, build: build_declaration };
const ASSIGNATION: NodeFactory = NodeFactory { name: "assignation", can_handle: is_assignation, build: build_assignation };
const FUNCTION_CALL: NodeFactory = NodeFactory { name: "function call", can_handle: is_function_call, build: build_function_call };

lazy_static! {
    static ref FACTORIES_V1_0: [NodeFactory; 4] = [
        PRINTLN,
        DECLARATION,
        ASSIGNATION,
        FUNCTION_CALL,
    ];

    static ref FACTORIES_V1_1: [NodeFactory; 5] = [
        CONDITIONAL,
        PRINTLN,
        DECLARATION,
        ASSIGNATION,
        FUNCTION_CALL,
    ];
}

/// Factories of a version in priority order.
pub fn factories(version: GrammarVersion) -> &'static [NodeFactory] {
    match version {
        GrammarVersion::V1_0 => &*FACTORIES_V1_0,
        GrammarVersion::V1_1 => &*FACTORIES_V1_1,
    }
}

// Predicates

fn is_conditional(tokens: &[Token]) -> bool {
    tokens.iter().any(|token| token.is(TokenKind::Conditional, "if"))
}

fn is_println(tokens: &[Token]) -> bool {
    tokens.first().map_or(false, |first| first.is(TokenKind::Function, "println"))
}

fn is_declaration(tokens: &[Token]) -> bool {
    contains_kind(tokens, TokenKind::Keyword)
}

fn is_assignation(tokens: &[Token]) -> bool {
    contains_kind(tokens, TokenKind::Assignation)
}

fn is_function_call(tokens: &[Token]) -> bool {
    contains_kind(tokens, TokenKind::Function) || matches!(tokens, [name, paren, ..]
        if name.kind() == TokenKind::Identifier && paren.is(TokenKind::Parenthesis, "("))
}

// Builders

fn build_conditional(parser: &Parser, tokens: &[Token]) -> ParseResult<Node> {
    let tokens = strip_terminator(tokens);

    let if_index = tokens.iter().position(|token| token.is(TokenKind::Conditional, "if"))
        .ok_or(ParseError::Unhandled { pos: start_of(tokens) })?;

    if if_index > 0 {
        return Err(ParseError::unexpected(&tokens[0]));
    }

    let if_token = &tokens[if_index];
    let open = if_index + 1;
    expect_at(tokens, open, TokenKind::Parenthesis, "(", "'(' after 'if'", *if_token.end())?;
    let close = find_closing(tokens, open)
        .ok_or(ParseError::Missing { expected: "')' after condition", pos: *tokens[open].start() })?;

    let condition = match &tokens[open + 1..close] {
        [single] => literal(single)?,
        [] => return Err(ParseError::Missing { expected: "condition", pos: *tokens[close].start() }),
        [_, second, ..] => return Err(ParseError::unexpected(second)),
    };

    let (then_block, next) = block_at(parser, tokens, close + 1, *tokens[close].end())?;

    let (else_block, next) = match tokens.get(next) {
        Some(token) if token.is(TokenKind::Conditional, "else") => block_at(parser, tokens, next + 1, *token.end())?,
        _ => (Node::nil(*tokens[next - 1].end()), next),
    };

    if let Some(extra) = tokens.get(next) {
        return Err(ParseError::unexpected(extra));
    }

    Ok(Node::Conditional {
        condition: Box::new(condition),
        then_block: Box::new(then_block),
        else_block: Box::new(else_block),
        position: *if_token.start(),
    })
}

fn build_println(_parser: &Parser, tokens: &[Token]) -> ParseResult<Node> {
    let tokens = strip_terminator(tokens);
    let name = &tokens[0];

    let expression = call_argument(&tokens[1..], name)?;

    Ok(Node::Print { expression: Box::new(expression), position: *name.start() })
}

fn build_declaration(_parser: &Parser, tokens: &[Token]) -> ParseResult<Node> {
    let tokens = strip_terminator(tokens);
    let assign = tokens.iter().position(|token| token.kind() == TokenKind::Assignation);

    let head = match assign {
        Some(index) => &tokens[..index],
        None => tokens,
    };

    let keyword = find_kind(head, TokenKind::Keyword)
        .ok_or(ParseError::Missing { expected: "declaration keyword", pos: start_of(tokens) })?;
    let id = find_kind(head, TokenKind::Identifier)
        .ok_or(ParseError::Missing { expected: "identifier", pos: *keyword.end() })?;
    let data_type = find_kind(head, TokenKind::DataType)
        .ok_or(ParseError::Missing { expected: "data type", pos: *id.end() })?;
    let declarator = find_kind(head, TokenKind::Declarator)
        .map(|token| token.lexeme())
        .unwrap_or(":");

    let expr = match assign {
        None => Node::nil(*data_type.end()),
        Some(index) => {
            let value = &tokens[index + 1..];

            if value.is_empty() {
                return Err(ParseError::Missing { expected: "expression after '='", pos: *tokens[index].end() });
            }

            check_type_consistency(data_type, value)?;
            parse_value(value)?
        },
    };

    Ok(Node::Declaration {
        keyword: keyword.lexeme().to_owned(),
        id: id.lexeme().to_owned(),
        declarator: declarator.to_owned(),
        data_type: data_type.lexeme().to_owned(),
        expr: Box::new(expr),
        position: *keyword.start(),
    })
}

fn build_assignation(parser: &Parser, tokens: &[Token]) -> ParseResult<Node> {
    let stripped = strip_terminator(tokens);
    let assign = stripped.iter().position(|token| token.kind() == TokenKind::Assignation)
        .ok_or(ParseError::Unhandled { pos: start_of(tokens) })?;

    let (left, right) = (&stripped[..assign], &stripped[assign + 1..]);

    let id = match left {
        [] => return Err(ParseError::Missing { expected: "identifier before '='", pos: *stripped[assign].start() }),
        [id] if id.kind() == TokenKind::Identifier => id,
        [other] => return Err(ParseError::unexpected(other)),
        _ => return build_declaration(parser, tokens),
    };

    let expression = if right.is_empty() {
        Node::nil(*stripped[assign].end())
    } else {
        parse_value(right)?
    };

    Ok(Node::Assignation { id: id.lexeme().to_owned(), expression: Box::new(expression), position: *id.start() })
}

fn build_function_call(_parser: &Parser, tokens: &[Token]) -> ParseResult<Node> {
    call_at_start(strip_terminator(tokens))
}

// Shared pieces

/// Right-hand side of a declaration or assignment.
fn parse_value(tokens: &[Token]) -> ParseResult<Node> {
    match tokens {
        [single] => literal(single),
        _ if contains_kind(tokens, TokenKind::Function) => call_at_start(tokens),
        _ => parse_expression(tokens),
    }
}

fn call_at_start(tokens: &[Token]) -> ParseResult<Node> {
    match tokens.first() {
        Some(name) if matches!(name.kind(), TokenKind::Function | TokenKind::Identifier) => {
            let argument = call_argument(&tokens[1..], name)?;
            Ok(Node::FunctionCall { name: name.lexeme().to_owned(), argument: Box::new(argument), position: *name.start() })
        },
        Some(other) => Err(ParseError::unexpected(other)),
        None => Err(ParseError::Missing { expected: "function call", pos: TokenPos::begin() }),
    }
}

/// The argument of `name(...)`: a single token stays a literal, anything longer is an expression.
fn call_argument(rest: &[Token], name: &Token) -> ParseResult<Node> {
    match rest {
        [] => Err(ParseError::Missing { expected: "argument", pos: *name.end() }),
        [single] => literal(single),
        [open, ..] if open.is(TokenKind::Parenthesis, "(") => {
            let close = find_closing(rest, 0)
                .ok_or(ParseError::Missing { expected: "')' after argument", pos: *rest[rest.len() - 1].end() })?;

            if let Some(extra) = rest.get(close + 1) {
                return Err(ParseError::unexpected(extra));
            }

            let inner = &rest[1..close];

            if inner.is_empty() {
                return Err(ParseError::Missing { expected: "argument", pos: *open.end() });
            }

            parse_value(inner)
        },
        [other, ..] => Err(ParseError::unexpected(other)),
    }
}

/// Parses the `{ ... }` starting at `open`, returning the block and the index after its `}`.
fn block_at(parser: &Parser, tokens: &[Token], open: usize, pos: TokenPos) -> ParseResult<(Node, usize)> {
    expect_at(tokens, open, TokenKind::Parenthesis, "{", "'{'", pos)?;

    let close = find_matching(tokens, open, "{", "}")
        .ok_or(ParseError::UnclosedBlock { pos: *tokens[open].start() })?;

    let inner = &tokens[open + 1..close];
    let statements = if inner.is_empty() { Vec::new() } else { parser.parse(inner)? };

    Ok((Node::Block { statements, position: *tokens[open].start() }, close + 1))
}

fn check_type_consistency(data_type: &Token, value: &[Token]) -> ParseResult<()> {
    // The result type of a call is only known at runtime
    if contains_kind(value, TokenKind::Function) {
        return Ok(());
    }

    let consistent = match data_type.lexeme() {
        "number" => !contains_kind(value, TokenKind::BooleanLiteral) && !contains_kind(value, TokenKind::StringLiteral),
        "string" => contains_kind(value, TokenKind::StringLiteral),
        "boolean" => !contains_kind(value, TokenKind::NumberLiteral) && !contains_kind(value, TokenKind::StringLiteral),
        _ => true,
    };

    if consistent {
        Ok(())
    } else {
        Err(ParseError::TypeInconsistency { data_type: data_type.lexeme().to_owned(), pos: *data_type.start() })
    }
}

fn expect_at(tokens: &[Token], index: usize, kind: TokenKind, lexeme: &str, expected: &'static str, pos: TokenPos) -> ParseResult<()> {
    match tokens.get(index) {
        Some(token) if token.is(kind, lexeme) => Ok(()),
        Some(token) => Err(ParseError::unexpected(token)),
        None => Err(ParseError::Missing { expected, pos }),
    }
}

fn strip_terminator(tokens: &[Token]) -> &[Token] {
    let mut end = tokens.len();

    while end > 0 && tokens[end - 1].is(TokenKind::Punctuator, ";") {
        end -= 1;
    }

    &tokens[..end]
}

fn contains_kind(tokens: &[Token], kind: TokenKind) -> bool {
    tokens.iter().any(|token| token.kind() == kind)
}

fn find_kind(tokens: &[Token], kind: TokenKind) -> Option<&Token> {
    tokens.iter().find(|token| token.kind() == kind)
}

fn start_of(tokens: &[Token]) -> TokenPos {
    tokens.first().map(|token| *token.start()).unwrap_or_else(TokenPos::begin)
}
