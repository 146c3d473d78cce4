pub mod version;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod environment;
pub mod interpreter;
pub mod io;

use crate::language::ast::Node;
use crate::language::lexer::{Lexer, LexerError, Token};
use crate::language::parser::Parser;
use crate::language::version::GrammarVersion;
use crate::Error;

/// Lexes `source` with a freshly built lexer for `version`.
pub fn tokenize(source: &str, version: GrammarVersion) -> Result<Vec<Token>, LexerError> {
    Lexer::new(version)?.tokenize(source)
}

/// Lexes and parses `source` into one node per top-level statement.
pub fn parse_source(source: &str, version: GrammarVersion) -> Result<Vec<Node>, Error> {
    let tokens = tokenize(source, version)?;
    Ok(Parser::new(version).parse(&tokens)?)
}
