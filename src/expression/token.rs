//! Token types produced by the lexer

use std::fmt;

use serde::Serialize;

/// Kind of a lexical token
///
/// [`TokenType::LEXABLE`] lists the types in the priority order the lexer
/// tries them: multi-character operators come before their one-character
/// prefixes (`>=` before `>`, `!=` before `!`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Numeric,
    Dot,
    Hyphen,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Tilde,
    Caret,
    Wildcard,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Whitespace,
    /// Synthetic terminator appended by the lexer; never matched from input
    EndOfInput,
}

impl TokenType {
    pub const LEXABLE: [TokenType; 18] = [
        TokenType::Numeric,
        TokenType::Dot,
        TokenType::Hyphen,
        TokenType::Equal,
        TokenType::NotEqual,
        TokenType::GreaterEqual,
        TokenType::Greater,
        TokenType::LessEqual,
        TokenType::Less,
        TokenType::Tilde,
        TokenType::Caret,
        TokenType::Wildcard,
        TokenType::And,
        TokenType::Or,
        TokenType::Not,
        TokenType::LeftParen,
        TokenType::RightParen,
        TokenType::Whitespace,
    ];

    /// Regex fragment matched at the start of the remaining input
    pub(crate) fn pattern(&self) -> Option<&'static str> {
        let pattern = match self {
            TokenType::Numeric => r"0|[1-9][0-9]*",
            TokenType::Dot => r"\.",
            TokenType::Hyphen => r"-",
            TokenType::Equal => r"=",
            TokenType::NotEqual => r"!=",
            TokenType::Greater => r">",
            TokenType::GreaterEqual => r">=",
            TokenType::Less => r"<",
            TokenType::LessEqual => r"<=",
            TokenType::Tilde => r"~",
            TokenType::Caret => r"\^",
            TokenType::Wildcard => r"[*xX]",
            TokenType::And => r"&",
            TokenType::Or => r"\|",
            TokenType::Not => r"!",
            TokenType::LeftParen => r"\(",
            TokenType::RightParen => r"\)",
            TokenType::Whitespace => r"\s+",
            TokenType::EndOfInput => return None,
        };
        Some(pattern)
    }

    /// Human readable name used in diagnostics
    pub fn description(&self) -> &'static str {
        match self {
            TokenType::Numeric => "number",
            TokenType::Dot => "'.'",
            TokenType::Hyphen => "'-'",
            TokenType::Equal => "'='",
            TokenType::NotEqual => "'!='",
            TokenType::Greater => "'>'",
            TokenType::GreaterEqual => "'>='",
            TokenType::Less => "'<'",
            TokenType::LessEqual => "'<='",
            TokenType::Tilde => "'~'",
            TokenType::Caret => "'^'",
            TokenType::Wildcard => "wildcard",
            TokenType::And => "'&'",
            TokenType::Or => "'|'",
            TokenType::Not => "'!'",
            TokenType::LeftParen => "'('",
            TokenType::RightParen => "')'",
            TokenType::Whitespace => "whitespace",
            TokenType::EndOfInput => "end of input",
        }
    }

    /// Tokens that can appear inside a `major.minor.patch` run
    pub(crate) fn is_version_part(&self) -> bool {
        matches!(self, TokenType::Numeric | TokenType::Dot)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A lexeme together with its type and byte offset in the source expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub lexeme: String,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, position: usize) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn end_of_input(position: usize) -> Self {
        Self::new(TokenType::EndOfInput, "", position)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::EndOfInput => f.write_str("end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
