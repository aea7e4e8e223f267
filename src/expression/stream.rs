//! Index-based cursor over a materialized token vector
//!
//! The parser owns one stream per `parse` call. Peeking never consumes, and
//! reading past the last token keeps returning the end-of-input token, so the
//! grammar never has to special-case exhaustion.

use crate::expression::error::UnexpectedTokenError;
use crate::expression::token::{Token, TokenType};

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    end_of_input: Token,
    cursor: usize,
}

impl TokenStream {
    /// Build a stream from lexer output
    ///
    /// A trailing end-of-input token is split off and kept aside; if `tokens`
    /// has none, one is synthesized right after the last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let end_of_input = match tokens.pop() {
            Some(last) if last.is(TokenType::EndOfInput) => last,
            Some(last) => {
                let end = Token::end_of_input(last.position + last.lexeme.len());
                tokens.push(last);
                end
            }
            None => Token::end_of_input(0),
        };
        Self {
            tokens,
            end_of_input,
            cursor: 0,
        }
    }

    /// Token `k` places ahead of the cursor; `peek(0)` is the next token
    pub fn peek(&self, k: usize) -> &Token {
        self.tokens
            .get(self.cursor + k)
            .unwrap_or(&self.end_of_input)
    }

    pub fn lookahead(&self) -> &Token {
        self.peek(0)
    }

    pub fn positive_lookahead(&self, token_type: TokenType) -> bool {
        self.lookahead().is(token_type)
    }

    /// Take the next token; at the end this keeps returning end of input
    pub fn consume(&mut self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                token.clone()
            }
            None => self.end_of_input.clone(),
        }
    }

    pub fn consume_if(&mut self, token_type: TokenType) -> Option<Token> {
        if self.positive_lookahead(token_type) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consume the next token if it has one of `expected`, otherwise report it
    pub fn expect(&mut self, expected: &[TokenType]) -> Result<Token, UnexpectedTokenError> {
        let next = self.lookahead();
        if expected.contains(&next.token_type) {
            Ok(self.consume())
        } else {
            Err(UnexpectedTokenError::new(next.clone(), expected))
        }
    }

    /// Unconsumed tokens, ending with end of input
    pub fn remaining(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .get(self.cursor..)
            .unwrap_or_default()
            .iter()
            .chain(std::iter::once(&self.end_of_input))
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::lexer::Lexer;

    fn stream(input: &str) -> TokenStream {
        Lexer::new().tokenize(input).unwrap()
    }

    #[test]
    fn peek_does_not_consume() {
        let tokens = stream("1.2");
        assert!(tokens.peek(0).is(TokenType::Numeric));
        assert!(tokens.peek(1).is(TokenType::Dot));
        assert!(tokens.peek(2).is(TokenType::Numeric));
        assert!(tokens.peek(3).is(TokenType::EndOfInput));
        assert!(tokens.peek(42).is(TokenType::EndOfInput));
        assert_eq!(tokens.remaining().count(), 4);
    }

    #[test]
    fn consume_stops_at_end_of_input() {
        let mut tokens = stream("1");
        assert_eq!(tokens.consume().lexeme, "1");
        assert!(tokens.is_exhausted());
        assert!(tokens.consume().is(TokenType::EndOfInput));
        assert!(tokens.consume().is(TokenType::EndOfInput));
    }

    #[test]
    fn consume_if_only_takes_matching_token() {
        let mut tokens = stream("~1");
        assert!(tokens.consume_if(TokenType::Caret).is_none());
        assert!(tokens.consume_if(TokenType::Tilde).is_some());
        assert!(tokens.positive_lookahead(TokenType::Numeric));
    }

    #[test]
    fn expect_reports_found_and_expected() {
        let mut tokens = stream(">1");
        let err = tokens.expect(&[TokenType::Numeric, TokenType::Dot]).unwrap_err();
        assert_eq!(err.found, Token::new(TokenType::Greater, ">", 0));
        assert_eq!(err.expected, vec![TokenType::Numeric, TokenType::Dot]);
        // the failed expectation consumed nothing
        assert!(tokens.positive_lookahead(TokenType::Greater));
    }

    #[test]
    fn missing_end_of_input_is_synthesized() {
        let tokens = TokenStream::new(vec![Token::new(TokenType::Numeric, "12", 3)]);
        assert_eq!(tokens.peek(1), &Token::end_of_input(5));
        assert_eq!(TokenStream::new(Vec::new()).peek(0), &Token::end_of_input(0));
    }
}
