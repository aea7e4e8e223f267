//! Recursive-descent parser for range expressions
//!
//! Grammar:
//!
//! ```text
//! expr       := term { ("&" | "|") term }
//! term       := "!" "(" expr ")" | "(" expr ")" | range
//! range      := tilde | caret | wildcard | hyphen | partial | comparison
//! comparison := [ "=" | "!=" | ">" | ">=" | "<" | "<=" ] version
//! tilde      := "~" version
//! caret      := "^" version
//! wildcard   := "*" | major "." "*" [ "." "*" ] | major "." minor "." "*"
//! hyphen     := version "-" version
//! partial    := major | major "." minor
//! version    := major [ "." minor [ "." patch ] ]
//! ```
//!
//! `&`/`|` chains are collected in a loop and grouped to the right, so long
//! chains do not deepen the call stack. Groups nest at most
//! [`MAX_NESTING_DEPTH`] levels.
//!
//! `wildcard`, `hyphen`, `partial` and `comparison` all start with a number.
//! The parser peeks past the version tokens (at most [`LOOKAHEAD_LIMIT`]) to
//! pick one without consuming anything.
//!
//! Every range form expands into `>=lower & <upper` (or `<=upper` for
//! hyphen ranges); `*` expands to `>=0.0.0` and `^0.0.0` to `=0.0.0`.

use tracing::debug;

use crate::config::{LOOKAHEAD_LIMIT, MAX_NESTING_DEPTH, ParserConfig, TildeZeroMinor};
use crate::expression::ast::Expression;
use crate::expression::error::{LexError, ParseError, UnexpectedTokenError};
use crate::expression::lexer::Lexer;
use crate::expression::stream::TokenStream;
use crate::expression::token::TokenType;
use crate::version::Version;

/// Parses range expressions into [`Expression`] trees
///
/// The parser itself is stateless; every call to [`ExpressionParser::parse`]
/// owns its own token stream, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExpressionParser {
    config: ParserConfig,
}

impl ExpressionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, input: &str) -> Result<Expression, ParseError> {
        let tokens = Lexer::new().tokenize(input)?;
        let mut parse = Parse {
            tokens,
            config: &self.config,
            depth: 0,
        };
        let expression = parse.expression()?;
        parse.close(TokenType::EndOfInput)?;
        Ok(expression)
    }
}

/// Tokens that can begin an expression; every one after the first two
/// begins a range
const EXPRESSION_START: [TokenType; 12] = [
    TokenType::Not,
    TokenType::LeftParen,
    TokenType::Tilde,
    TokenType::Caret,
    TokenType::Wildcard,
    TokenType::Equal,
    TokenType::NotEqual,
    TokenType::Greater,
    TokenType::GreaterEqual,
    TokenType::Less,
    TokenType::LessEqual,
    TokenType::Numeric,
];

fn combine(operator: TokenType, left: Expression, right: Expression) -> Expression {
    match operator {
        TokenType::And => Expression::and(left, right),
        _ => Expression::or(left, right),
    }
}

/// State of a single `parse` call
struct Parse<'a> {
    tokens: TokenStream,
    config: &'a ParserConfig,
    /// Number of enclosing `(` groups
    depth: usize,
}

impl Parse<'_> {
    /// One or more terms joined by `&`/`|`, grouped to the right
    fn expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let operator = self.tokens.lookahead().token_type;
            if !matches!(operator, TokenType::And | TokenType::Or) {
                break;
            }
            self.tokens.consume();
            rest.push((operator, self.term()?));
        }

        let Some((mut operator, mut expression)) = rest.pop() else {
            return Ok(first);
        };
        while let Some((previous, left)) = rest.pop() {
            expression = combine(operator, left, expression);
            operator = previous;
        }
        Ok(combine(operator, first, expression))
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        let next = self.tokens.lookahead();
        if !next.is(TokenType::Not) && !next.is(TokenType::LeftParen) {
            return self.range();
        }
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(UnexpectedTokenError::new(next.clone(), &EXPRESSION_START[2..]).into());
        }

        let negated = self.tokens.consume_if(TokenType::Not).is_some();
        self.tokens.expect(&[TokenType::LeftParen])?;
        self.depth += 1;
        let inner = self.expression()?;
        self.close(TokenType::RightParen)?;
        self.depth -= 1;

        Ok(if negated { Expression::not(inner) } else { inner })
    }

    /// Consume `closer`, or fail listing everything that may follow an expression
    fn close(&mut self, closer: TokenType) -> Result<(), UnexpectedTokenError> {
        if self.tokens.consume_if(closer).is_some() {
            return Ok(());
        }
        Err(UnexpectedTokenError::new(
            self.tokens.lookahead().clone(),
            &[TokenType::And, TokenType::Or, closer],
        ))
    }

    fn range(&mut self) -> Result<Expression, ParseError> {
        let next = self.tokens.lookahead().token_type;
        if !EXPRESSION_START.contains(&next) {
            return Err(
                UnexpectedTokenError::new(self.tokens.lookahead().clone(), &EXPRESSION_START).into(),
            );
        }
        let (production, expression) = if next == TokenType::Tilde {
            ("tilde", self.tilde_range()?)
        } else if next == TokenType::Caret {
            ("caret", self.caret_range()?)
        } else if self.is_version_followed_by(TokenType::Wildcard) {
            ("wildcard", self.wildcard_range()?)
        } else if self.is_version_followed_by(TokenType::Hyphen) {
            ("hyphen", self.hyphen_range()?)
        } else if self.is_partial_version_range() {
            ("partial", self.partial_version_range()?)
        } else {
            ("comparison", self.comparison_range()?)
        };
        debug!(production, %expression, "parsed range");
        Ok(expression)
    }

    /// Whether the first token after a run of version tokens has `token_type`
    fn is_version_followed_by(&self, token_type: TokenType) -> bool {
        (0..=LOOKAHEAD_LIMIT)
            .map(|k| self.tokens.peek(k))
            .find(|token| !token.token_type.is_version_part())
            .is_some_and(|token| token.is(token_type))
    }

    /// `1` or `1.2`: a number whose version run ends before a full `major.minor.patch`
    fn is_partial_version_range(&self) -> bool {
        self.tokens.positive_lookahead(TokenType::Numeric)
            && (0..LOOKAHEAD_LIMIT).any(|k| !self.tokens.peek(k).token_type.is_version_part())
    }

    fn tilde_range(&mut self) -> Result<Expression, ParseError> {
        self.tokens.expect(&[TokenType::Tilde])?;
        let major = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            let lower = Version::new(major, 0, 0);
            let upper = lower.increment_major();
            return Ok(Expression::half_open(lower, upper));
        }

        let minor = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            let lower = Version::new(major, minor, 0);
            let upper = lower.increment_minor();
            return Ok(Expression::half_open(lower, upper));
        }

        let patch = self.numeric()?;
        let lower = Version::new(major, minor, patch);
        let upper = match self.config.tilde_zero_minor {
            TildeZeroMinor::PinPatch if major == 0 && minor == 0 => lower.increment_patch(),
            _ => lower.increment_minor(),
        };
        Ok(Expression::half_open(lower, upper))
    }

    fn caret_range(&mut self) -> Result<Expression, ParseError> {
        self.tokens.expect(&[TokenType::Caret])?;
        let major = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            let lower = Version::new(major, 0, 0);
            let upper = lower.increment_major();
            return Ok(Expression::half_open(lower, upper));
        }

        let minor = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            let lower = Version::new(major, minor, 0);
            let upper = if major > 0 {
                lower.increment_major()
            } else {
                lower.increment_minor()
            };
            return Ok(Expression::half_open(lower, upper));
        }

        let patch = self.numeric()?;
        let lower = Version::new(major, minor, patch);
        let upper = if major > 0 {
            lower.increment_major()
        } else if minor > 0 {
            lower.increment_minor()
        } else if patch > 0 {
            lower.increment_patch()
        } else {
            return Ok(Expression::Equal(lower));
        };
        Ok(Expression::half_open(lower, upper))
    }

    fn wildcard_range(&mut self) -> Result<Expression, ParseError> {
        if self.tokens.consume_if(TokenType::Wildcard).is_some() {
            return Ok(Expression::GreaterOrEqual(Version::new(0, 0, 0)));
        }

        let major = self.numeric()?;
        self.tokens.expect(&[TokenType::Dot])?;
        if self.tokens.consume_if(TokenType::Wildcard).is_some() {
            // `1.x.x` means the same as `1.x`
            if self.tokens.peek(0).is(TokenType::Dot) && self.tokens.peek(1).is(TokenType::Wildcard)
            {
                self.tokens.consume();
                self.tokens.consume();
            }
            let lower = Version::new(major, 0, 0);
            let upper = lower.increment_major();
            return Ok(Expression::half_open(lower, upper));
        }

        let minor = self.numeric()?;
        self.tokens.expect(&[TokenType::Dot])?;
        self.tokens.expect(&[TokenType::Wildcard])?;
        let lower = Version::new(major, minor, 0);
        let upper = lower.increment_minor();
        Ok(Expression::half_open(lower, upper))
    }

    fn hyphen_range(&mut self) -> Result<Expression, ParseError> {
        let lower = self.version()?;
        self.tokens.expect(&[TokenType::Hyphen])?;
        let upper = self.version()?;
        Ok(Expression::closed(lower, upper))
    }

    fn partial_version_range(&mut self) -> Result<Expression, ParseError> {
        let major = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            let lower = Version::new(major, 0, 0);
            let upper = lower.increment_major();
            return Ok(Expression::half_open(lower, upper));
        }

        let minor = self.numeric()?;
        let lower = Version::new(major, minor, 0);
        let upper = lower.increment_minor();
        Ok(Expression::half_open(lower, upper))
    }

    fn comparison_range(&mut self) -> Result<Expression, ParseError> {
        let operator = self.tokens.lookahead().token_type;
        let build: fn(Version) -> Expression = match operator {
            TokenType::Equal => Expression::Equal,
            TokenType::NotEqual => Expression::NotEqual,
            TokenType::Greater => Expression::Greater,
            TokenType::GreaterEqual => Expression::GreaterOrEqual,
            TokenType::Less => Expression::Less,
            TokenType::LessEqual => Expression::LessOrEqual,
            _ => return Ok(Expression::Equal(self.version()?)),
        };
        self.tokens.consume();
        Ok(build(self.version()?))
    }

    fn version(&mut self) -> Result<Version, ParseError> {
        let major = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            return Ok(Version::new(major, 0, 0));
        }
        let minor = self.numeric()?;
        if self.tokens.consume_if(TokenType::Dot).is_none() {
            return Ok(Version::new(major, minor, 0));
        }
        let patch = self.numeric()?;
        Ok(Version::new(major, minor, patch))
    }

    fn numeric(&mut self) -> Result<u64, ParseError> {
        let token = self.tokens.expect(&[TokenType::Numeric])?;
        token
            .lexeme
            .parse::<u64>()
            .map_err(|_| LexError::new(token.lexeme.as_str(), token.position).into())
    }
}
