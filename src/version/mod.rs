//! Semantic version value type
//!
//! This module provides the [`Version`] type the expression engine compares
//! against, along with its identifier lists and error type.
//!
//! # Modules
//!
//! - [`semver`]: `Version` parsing, precedence and increments
//! - [`identifier`]: pre-release and build identifiers and their order
//! - [`compat`]: conversions to and from the `semver` crate
//! - [`error`]: `MalformedVersionError`

pub mod compat;
pub mod error;
pub mod identifier;
pub mod semver;

pub use error::{MalformedReason, MalformedVersionError};
pub use identifier::Identifier;
pub use self::semver::Version;
