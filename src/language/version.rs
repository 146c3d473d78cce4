use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use crate::language::lexer::TokenKind;

/// Language revision selecting the active token patterns, node factories and runtime rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrammarVersion {
    V1_0,
    V1_1,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported version '{0}', expected one of: 1.0, 1.1")]
pub struct VersionError(pub String);

impl GrammarVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarVersion::V1_0 => "1.0",
            GrammarVersion::V1_1 => "1.1",
        }
    }
}

impl FromStr for GrammarVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(GrammarVersion::V1_0),
            "1.1" => Ok(GrammarVersion::V1_1),
            other => Err(VersionError(other.to_owned())),
        }
    }
}

impl Display for GrammarVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const STRING_LITERAL: &str = r#""[^"]*"|'[^']*'"#;
const NUMBER_LITERAL: &str = r"\d+(?:\.\d+)?";
// Multi-character operators come first so they win over their one-character prefixes
const OPERATOR: &str = r"==|!=|<=|>=|\+\+|--|[-+*/<>]";
const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// Ordered `(kind, pattern)` pairs for a version.
///
/// The order is the classification priority: a lexeme is given the kind of the first
/// pattern that matches it completely, so reserved words must precede `Identifier`.
pub fn token_patterns(version: GrammarVersion) -> Vec<(TokenKind, &'static str)> {
    match version {
        GrammarVersion::V1_0 => vec![
            (TokenKind::Keyword, r"\blet\b"),
            (TokenKind::DataType, r"\b(?:number|string)\b"),
            (TokenKind::Function, r"\bprintln\b"),
            (TokenKind::StringLiteral, STRING_LITERAL),
            (TokenKind::NumberLiteral, NUMBER_LITERAL),
            (TokenKind::Operator, OPERATOR),
            (TokenKind::Assignation, "="),
            (TokenKind::Declarator, ":"),
            (TokenKind::Parenthesis, r"[(){}]"),
            (TokenKind::Punctuator, r"[;,]"),
            (TokenKind::Identifier, IDENTIFIER),
        ],
        GrammarVersion::V1_1 => vec![
            (TokenKind::Keyword, r"\b(?:let|const)\b"),
            (TokenKind::DataType, r"\b(?:number|string|boolean)\b"),
            (TokenKind::Function, r"\b(?:println|readInput|readEnv)\b"),
            (TokenKind::Conditional, r"\b(?:if|else)\b"),
            (TokenKind::BooleanLiteral, r"\b(?:true|false)\b"),
            (TokenKind::StringLiteral, STRING_LITERAL),
            (TokenKind::NumberLiteral, NUMBER_LITERAL),
            (TokenKind::Operator, OPERATOR),
            (TokenKind::Assignation, "="),
            (TokenKind::Declarator, ":"),
            (TokenKind::Parenthesis, r"[(){}]"),
            (TokenKind::Punctuator, r"[;,]"),
            (TokenKind::Identifier, IDENTIFIER),
        ],
    }
}
