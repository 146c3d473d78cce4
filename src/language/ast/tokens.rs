//! Re-synthesis of a flat token view from syntax trees.
//!
//! Rule checkers work on tokens rather than nodes. The tokens produced here are not the
//! lexer's originals: every token carries the position of the node that emitted it.

use crate::language::ast::Node;
use crate::language::lexer::{Token, TokenKind, TokenPos};

const BUILTIN_FUNCTIONS: [&str; 3] = ["println", "readInput", "readEnv"];

/// Tokens for one top-level statement, including its terminator.
pub fn statement_tokens(node: &Node) -> Vec<Token> {
    let mut out = Vec::new();
    push_statement(node, &mut out);
    out
}

/// One flattened sequence per statement.
pub fn program_tokens(nodes: &[Node]) -> Vec<Vec<Token>> {
    nodes.iter().map(statement_tokens).collect()
}

/// Tokens for a node in expression position, without a terminator.
pub fn expression_tokens(node: &Node) -> Vec<Token> {
    let mut out = Vec::new();
    push_expression(node, &mut out);
    out
}

fn push_statement(node: &Node, out: &mut Vec<Token>) {
    match node {
        Node::Block { .. } | Node::Conditional { .. } => push_expression(node, out),
        Node::Nil { .. } => {},
        _ => {
            push_expression(node, out);
            out.push(synthetic(TokenKind::Punctuator, ";", node.position()));
        },
    }
}

fn push_expression(node: &Node, out: &mut Vec<Token>) {
    match node {
        Node::Literal { value, kind, position } => out.push(synthetic(*kind, value, *position)),
        Node::Binary { left, right, operator, position } => {
            push_expression(left, out);
            out.push(synthetic(TokenKind::Operator, operator, *position));
            push_expression(right, out);
        },
        Node::Print { expression, position } => push_call("println", expression, *position, out),
        Node::Declaration { keyword, id, declarator, data_type, expr, position } => {
            out.push(synthetic(TokenKind::Keyword, keyword, *position));
            out.push(synthetic(TokenKind::Identifier, id, *position));
            out.push(synthetic(TokenKind::Declarator, declarator, *position));
            out.push(synthetic(TokenKind::DataType, data_type, *position));

            if !expr.is_nil() {
                out.push(synthetic(TokenKind::Assignation, "=", *position));
                push_expression(expr, out);
            }
        },
        Node::Assignation { id, expression, position } => {
            out.push(synthetic(TokenKind::Identifier, id, *position));
            out.push(synthetic(TokenKind::Assignation, "=", *position));
            push_expression(expression, out);
        },
        Node::Block { statements, position } => {
            out.push(synthetic(TokenKind::Parenthesis, "{", *position));

            for statement in statements {
                push_statement(statement, out);
            }

            out.push(synthetic(TokenKind::Parenthesis, "}", *position));
        },
        Node::Conditional { condition, then_block, else_block, position } => {
            out.push(synthetic(TokenKind::Conditional, "if", *position));
            out.push(synthetic(TokenKind::Parenthesis, "(", *position));
            push_expression(condition, out);
            out.push(synthetic(TokenKind::Parenthesis, ")", *position));
            push_expression(then_block, out);

            if !else_block.is_nil() {
                out.push(synthetic(TokenKind::Conditional, "else", else_block.position()));
                push_expression(else_block, out);
            }
        },
        Node::FunctionCall { name, argument, position } => push_call(name, argument, *position, out),
        Node::Nil { .. } => {},
    }
}

fn push_call(name: &str, argument: &Node, position: TokenPos, out: &mut Vec<Token>) {
    let kind = if BUILTIN_FUNCTIONS.contains(&name) { TokenKind::Function } else { TokenKind::Identifier };

    out.push(synthetic(kind, name, position));
    out.push(synthetic(TokenKind::Parenthesis, "(", position));
    push_expression(argument, out);
    out.push(synthetic(TokenKind::Parenthesis, ")", position));
}

fn synthetic(kind: TokenKind, lexeme: &str, position: TokenPos) -> Token {
    Token::new(kind, lexeme, position, position)
}
