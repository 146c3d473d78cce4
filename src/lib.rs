pub mod language;

use std::path::PathBuf;
use clap::Parser as ClapParser;
use crate::language::interpreter::{Interpreter, RuntimeError};
use crate::language::lexer::{LexerError, TokenPos};
use crate::language::parser::ParseError;
use crate::language::version::{GrammarVersion, VersionError};

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Script to execute")]
    pub input: PathBuf,
    #[clap(short, long, default_value = "1.1", help = "Language version (1.0 or 1.1)")]
    pub grammar: GrammarVersion,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn get_pos(&self) -> Option<TokenPos> {
        match self {
            Error::Lexer(err) => err.get_pos(),
            Error::Parse(err) => err.get_pos(),
            Error::Runtime(err) => err.get_pos(),
            Error::Version(_) | Error::Io(_) => None,
        }
    }

    /// One-line diagnostic, e.g. `Error at line 2, column 8: Unsupported character sequence '#'`.
    pub fn report(&self) -> String {
        match self.get_pos() {
            Some(pos) => format!("Error at {}: {}", pos, self),
            None => format!("Error: {}", self),
        }
    }
}

/// Lexes, parses and executes one script file with console collaborators.
pub fn run(config: &Config) -> Result<(), Error> {
    let source = std::fs::read_to_string(&config.input)?;
    let nodes = language::parse_source(&source, config.grammar)?;

    let mut interpreter = Interpreter::with_stdio(config.grammar);
    interpreter.run(&nodes)?;

    Ok(())
}
