use std::fmt::{Display, Formatter};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};
use crate::language::version::{token_patterns, GrammarVersion};


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 0)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    Keyword,
    Function,
    Conditional,
    Parenthesis,
    Declarator,
    Assignation,
    DataType,
    Operator,
    Identifier,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    Punctuator,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, start: TokenPos, end: TokenPos) -> Token {
        Token {
            kind, lexeme: lexeme.into(),
            start, end,
        }
    }

    pub fn kind(&self) -> TokenKind { self.kind }
    pub fn lexeme(&self) -> &str { &self.lexeme }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }

    /// Checks kind and lexeme at once, e.g. `token.is(TokenKind::Parenthesis, "{")`.
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("Unsupported character sequence '{text}'")]
    UnexpectedText {
        pos: TokenPos,
        text: String,
    },
    #[error("Failed to compile token pattern: {0}")]
    InvalidPattern(String),
}

impl LexerError {
    pub fn get_pos(&self) -> Option<TokenPos> {
        match self {
            LexerError::UnexpectedText { pos, .. } => Some(*pos),
            LexerError::InvalidPattern(_) => None,
        }
    }
}

type LexerResult<T> = Result<T, LexerError>;

/// Regex driven scanner for one grammar version.
///
/// The combined alternation is compiled once per lexer; every match is then classified
/// against the anchored per-kind patterns in declaration order.
pub struct Lexer {
    version: GrammarVersion,
    scanner: Regex,
    classifiers: Vec<(TokenKind, Regex)>,
}

impl Lexer {
    pub fn new(version: GrammarVersion) -> LexerResult<Lexer> {
        let patterns = token_patterns(version);

        let mut alternation = patterns.iter()
            .map(|(_, pattern)| format!("(?:{})", pattern))
            .collect::<Vec<String>>();
        // Anything left over is either blank or a character no pattern accepts
        alternation.push(String::from(r"\s+"));
        alternation.push(String::from("."));

        let scanner = Regex::new(&alternation.join("|"))
            .map_err(|err| LexerError::InvalidPattern(err.to_string()))?;

        let classifiers = patterns.into_iter()
            .map(|(kind, pattern)| Regex::new(&format!("^(?:{})$", pattern))
                .map(|regex| (kind, regex))
                .map_err(|err| LexerError::InvalidPattern(err.to_string())))
            .collect::<LexerResult<Vec<(TokenKind, Regex)>>>()?;

        Ok(Lexer { version, scanner, classifiers })
    }

    /// Builds a lexer from a version string such as `"1.1"`; unknown versions are rejected.
    pub fn for_version(version: &str) -> Result<Lexer, crate::Error> {
        let version = version.parse::<GrammarVersion>()?;
        Ok(Lexer::new(version)?)
    }

    /// Returns the kind of the first pattern that accepts `text` entirely.
    pub fn classify(&self, text: &str) -> TokenKind {
        self.classifiers.iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(kind, _)| *kind)
            .unwrap_or(TokenKind::Unknown)
    }

    pub fn tokenize(&self, source: &str) -> LexerResult<Vec<Token>> {
        let mut tokens = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let row = index as i32 + 1;

            for found in self.scanner.find_iter(line) {
                let text = found.as_str();
                let kind = self.classify(text);

                let start = TokenPos::new(row, column_of(line, found.start()));
                let end = TokenPos::new(row, column_of(line, found.end()));

                if kind == TokenKind::Unknown {
                    if text.trim().is_empty() {
                        continue;
                    }

                    return Err(LexerError::UnexpectedText { pos: start, text: text.to_owned() });
                }

                let lexeme = if kind == TokenKind::StringLiteral {
                    // Don't add leading and trailing quote characters to token
                    &text[1..text.len() - 1]
                } else {
                    text
                };

                trace!(?kind, lexeme, %start, "token");
                tokens.push(Token::new(kind, lexeme, start, end));
            }
        }

        debug!(version = %self.version, count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

fn column_of(line: &str, byte_offset: usize) -> i32 {
    line[..byte_offset].chars().count() as i32
}
