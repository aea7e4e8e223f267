//! Range expression engine
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Lexer    │────▶│ TokenStream │────▶│   Parser    │────▶│ Expression  │
//! │  (tokens)   │     │ (lookahead) │     │(range sugar)│     │ (interpret) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    ▲
//!                                                             ┌─────────────┐
//!                                                             │  Composite  │
//!                                                             │  (builder)  │
//!                                                             └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`token`]: token types and tokens
//! - [`lexer`]: input string to tokens
//! - [`stream`]: bounded-lookahead cursor the parser reads from
//! - [`parser`]: grammar and range-sugar expansion
//! - [`ast`]: expression tree and interpreter
//! - [`composite`]: fluent builder over expression trees
//! - [`error`]: lexer and parser errors

pub mod ast;
pub mod composite;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use ast::Expression;
pub use composite::CompositeExpression;
pub use error::{LexError, ParseError, UnexpectedTokenError};
pub use lexer::Lexer;
pub use parser::ExpressionParser;
pub use stream::TokenStream;
pub use token::{Token, TokenType};
