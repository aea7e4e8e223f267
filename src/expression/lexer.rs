//! Range expression lexer
//!
//! Scans left to right. At each position every pattern in
//! [`TokenType::LEXABLE`] is tried in order and the first non-empty match wins.
//! Whitespace is dropped and a synthetic end-of-input token closes the stream.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::expression::error::LexError;
use crate::expression::stream::TokenStream;
use crate::expression::token::{Token, TokenType};

static TOKEN_PATTERNS: LazyLock<Vec<(TokenType, Regex)>> = LazyLock::new(|| {
    TokenType::LEXABLE
        .iter()
        .filter_map(|token_type| {
            let pattern = token_type.pattern()?;
            let regex = Regex::new(&format!("^(?:{pattern})")).expect("token pattern is valid");
            Some((*token_type, regex))
        })
        .collect()
});

/// Converts a range expression into tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize `input` into a stream ready for the parser
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, LexError> {
        self.lex(input).map(TokenStream::new)
    }

    /// Tokenize `input`, dropping whitespace; the last token is always end of input
    pub fn lex(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let tokens = scan(input, false)?;
        debug!(input, count = tokens.len(), "tokenized range expression");
        Ok(tokens)
    }
}

pub(crate) fn scan(input: &str, keep_whitespace: bool) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < input.len() {
        let rest = &input[position..];
        let Some((token_type, len)) = match_token(rest) else {
            return Err(LexError::new(rest, position));
        };
        let lexeme = &rest[..len];

        // Numbers the parser cannot represent are unrecognized input
        if token_type == TokenType::Numeric && lexeme.parse::<u64>().is_err() {
            return Err(LexError::new(rest, position));
        }

        if token_type != TokenType::Whitespace || keep_whitespace {
            trace!(?token_type, lexeme, position, "token");
            tokens.push(Token::new(token_type, lexeme, position));
        }
        position += len;
    }

    tokens.push(Token::end_of_input(position));
    Ok(tokens)
}

fn match_token(rest: &str) -> Option<(TokenType, usize)> {
    TOKEN_PATTERNS.iter().find_map(|(token_type, regex)| {
        regex
            .find(rest)
            .filter(|m| !m.is_empty())
            .map(|m| (*token_type, m.end()))
    })
}
