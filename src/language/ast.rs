use std::fmt::{Debug, Formatter};
use crate::language::lexer::{TokenKind, TokenPos};

pub mod tokens;


/// Syntax tree produced per statement by the parser.
///
/// Children are always fully built; `Nil` marks an absent initializer or else-block and
/// never appears as a runtime value.
#[derive(Clone, PartialEq)]
pub enum Node {
    Literal {
        value: String,
        kind: TokenKind,
        position: TokenPos,
    },
    Binary {
        left: Box<Node>,
        right: Box<Node>,
        operator: String,
        position: TokenPos,
    },
    Print {
        expression: Box<Node>,
        position: TokenPos,
    },
    Declaration {
        keyword: String,
        id: String,
        declarator: String,
        data_type: String,
        expr: Box<Node>,
        position: TokenPos,
    },
    Assignation {
        id: String,
        expression: Box<Node>,
        position: TokenPos,
    },
    Block {
        statements: Vec<Node>,
        position: TokenPos,
    },
    Conditional {
        condition: Box<Node>,
        then_block: Box<Node>,
        else_block: Box<Node>,
        position: TokenPos,
    },
    FunctionCall {
        name: String,
        argument: Box<Node>,
        position: TokenPos,
    },
    Nil {
        position: TokenPos,
    },
}

impl Node {
    pub fn literal(value: impl Into<String>, kind: TokenKind, position: TokenPos) -> Node {
        Node::Literal { value: value.into(), kind, position }
    }

    pub fn binary(left: Node, operator: impl Into<String>, right: Node, position: TokenPos) -> Node {
        Node::Binary { left: Box::new(left), right: Box::new(right), operator: operator.into(), position }
    }

    pub fn nil(position: TokenPos) -> Node {
        Node::Nil { position }
    }

    pub fn position(&self) -> TokenPos {
        match self {
            Node::Literal { position, .. }
            | Node::Binary { position, .. }
            | Node::Print { position, .. }
            | Node::Declaration { position, .. }
            | Node::Assignation { position, .. }
            | Node::Block { position, .. }
            | Node::Conditional { position, .. }
            | Node::FunctionCall { position, .. }
            | Node::Nil { position } => *position,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Node::Nil { .. })
    }

    /// Variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal { .. } => "literal",
            Node::Binary { .. } => "binary expression",
            Node::Print { .. } => "print",
            Node::Declaration { .. } => "declaration",
            Node::Assignation { .. } => "assignation",
            Node::Block { .. } => "block",
            Node::Conditional { .. } => "conditional",
            Node::FunctionCall { .. } => "function call",
            Node::Nil { .. } => "nil",
        }
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Literal { value, kind: TokenKind::StringLiteral, .. } => write!(f, "\"{}\"", value),
            Node::Literal { value, .. } => write!(f, "{}", value),
            Node::Binary { left, right, operator, .. } => write!(f, "({:?} {} {:?})", left, operator, right),
            Node::Print { expression, .. } => write!(f, "println({:?});", expression),
            Node::Declaration { keyword, id, declarator, data_type, expr, .. } => {
                if expr.is_nil() {
                    write!(f, "{} {}{} {};", keyword, id, declarator, data_type)
                } else {
                    write!(f, "{} {}{} {} = {:?};", keyword, id, declarator, data_type, expr)
                }
            },
            Node::Assignation { id, expression, .. } => write!(f, "{} = {:?};", id, expression),
            Node::Block { statements, .. } => write!(f, "{{ {} }}", statements.iter()
                .map(|stmt| format!("{:?}", stmt))
                .collect::<Vec<String>>().join(" ")),
            Node::Conditional { condition, then_block, else_block, .. } => {
                if else_block.is_nil() {
                    write!(f, "if ({:?}) {:?}", condition, then_block)
                } else {
                    write!(f, "if ({:?}) {:?} else {:?}", condition, then_block, else_block)
                }
            },
            Node::FunctionCall { name, argument, .. } => write!(f, "{}({:?})", name, argument),
            Node::Nil { .. } => write!(f, "Nil"),
        }
    }
}
