use thiserror::Error;
use tracing::{debug, trace};
use crate::language::ast::Node;
use crate::language::lexer::{Token, TokenKind, TokenPos};
use crate::language::version::GrammarVersion;

pub mod segmenter;
pub mod factories;
pub mod expression;

#[cfg(test)]
mod tests;

use factories::NodeFactory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no valid code")]
    NoValidCode,
    #[error("Statement '{statement}' must end with ';' or '}}'")]
    Unterminated {
        statement: String,
        pos: TokenPos,
    },
    #[error("Unclosed block, expected '}}'")]
    UnclosedBlock {
        pos: TokenPos,
    },
    #[error("can't handle this sentence")]
    Unhandled {
        pos: TokenPos,
    },
    #[error("Expected {expected}")]
    Missing {
        expected: &'static str,
        pos: TokenPos,
    },
    #[error("Unexpected token '{lexeme}'")]
    UnexpectedToken {
        lexeme: String,
        pos: TokenPos,
    },
    #[error("Expression is inconsistent with declared type '{data_type}'")]
    TypeInconsistency {
        data_type: String,
        pos: TokenPos,
    },
}

impl ParseError {
    pub fn get_pos(&self) -> Option<TokenPos> {
        match self {
            ParseError::NoValidCode => None,
            ParseError::Unterminated { pos, .. }
            | ParseError::UnclosedBlock { pos }
            | ParseError::Unhandled { pos }
            | ParseError::Missing { pos, .. }
            | ParseError::UnexpectedToken { pos, .. }
            | ParseError::TypeInconsistency { pos, .. } => Some(*pos),
        }
    }

    pub(crate) fn unexpected(token: &Token) -> ParseError {
        ParseError::UnexpectedToken { lexeme: token.lexeme().to_owned(), pos: *token.start() }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Turns token sequences into one node per statement.
///
/// Holds no state between statements. Each statement slice is offered to the version's
/// factories in priority order and the first one that claims it builds the node.
pub struct Parser {
    version: GrammarVersion,
    factories: &'static [NodeFactory],
}

impl Parser {
    pub fn new(version: GrammarVersion) -> Parser {
        Parser {
            version,
            factories: factories::factories(version),
        }
    }

    pub fn parse(&self, tokens: &[Token]) -> ParseResult<Vec<Node>> {
        let statements = segmenter::segment(tokens)?;
        debug!(version = %self.version, count = statements.len(), "segmented statements");

        statements.into_iter()
            .map(|statement| self.parse_statement(statement))
            .collect()
    }

    pub fn parse_statement(&self, tokens: &[Token]) -> ParseResult<Node> {
        trace!(statement = %render(tokens), "parsing statement");

        let factory = self.factories.iter().find(|factory| (factory.can_handle)(tokens));

        match factory {
            Some(factory) => {
                debug!(factory = factory.name, "statement claimed");
                (factory.build)(self, tokens)
            },
            None => Err(ParseError::Unhandled {
                pos: tokens.first().map(|token| *token.start()).unwrap_or_else(TokenPos::begin),
            }),
        }
    }
}

/// Joins lexemes with single spaces, re-quoting string literals.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter()
        .map(|token| match token.kind() {
            TokenKind::StringLiteral if token.lexeme().contains('"') => format!("'{}'", token.lexeme()),
            TokenKind::StringLiteral => format!("\"{}\"", token.lexeme()),
            _ => token.lexeme().to_owned(),
        })
        .collect::<Vec<String>>().join(" ")
}
