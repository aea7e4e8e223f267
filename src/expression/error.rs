use thiserror::Error;

use crate::expression::token::{Token, TokenType};

/// Input the lexer could not match against any token pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized input \"{bad_substring}\" at position {position}")]
pub struct LexError {
    /// Unmatched remainder of the expression, starting at `position`
    pub bad_substring: String,
    pub position: usize,
}

impl LexError {
    pub fn new(bad_substring: impl Into<String>, position: usize) -> Self {
        Self {
            bad_substring: bad_substring.into(),
            position,
        }
    }
}

/// A token the grammar does not allow at its position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Unexpected {found} at position {}, expected {}",
    .found.position,
    describe_expected(.expected)
)]
pub struct UnexpectedTokenError {
    pub found: Token,
    pub expected: Vec<TokenType>,
}

impl UnexpectedTokenError {
    pub fn new(found: Token, expected: &[TokenType]) -> Self {
        Self {
            found,
            expected: expected.to_vec(),
        }
    }

    pub fn position(&self) -> usize {
        self.found.position
    }
}

fn describe_expected(expected: &[TokenType]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.description().to_string(),
        _ => {
            let names: Vec<_> = expected.iter().map(TokenType::description).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    UnexpectedToken(#[from] UnexpectedTokenError),
}

impl ParseError {
    /// Byte offset in the expression where parsing failed
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.position,
            ParseError::UnexpectedToken(err) => err.position(),
        }
    }
}
