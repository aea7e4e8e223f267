//! Semantic version range expressions
//!
//! Parses expressions such as `^1.2.3`, `~2.1`, `1.0.0 - 2.0.0` or
//! `>=1.0.0 & <2.0.0 | 3.x` and checks whether a [`Version`] satisfies them.
//!
//! ```
//! use semver_expr::{ExpressionParser, Version};
//!
//! let range = ExpressionParser::new().parse("^1.2.3 | 3.x").unwrap();
//! assert!(range.interpret(&Version::parse("1.4.0").unwrap()));
//! assert!(range.interpret(&Version::parse("3.1.0").unwrap()));
//! assert!(!range.interpret(&Version::parse("2.0.0").unwrap()));
//! ```

pub mod config;
pub mod expression;
pub mod version;

pub use config::{EngineConfig, ParserConfig, TildeZeroMinor};
pub use expression::{
    CompositeExpression, Expression, ExpressionParser, LexError, ParseError, Token, TokenType,
    UnexpectedTokenError,
};
pub use version::{MalformedVersionError, Version};
