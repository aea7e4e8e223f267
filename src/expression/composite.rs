//! Fluent builder over [`Expression`]
//!
//! ```
//! use semver_expr::{CompositeExpression, Version};
//!
//! let range = CompositeExpression::gte(Version::new(1, 0, 0))
//!     .and(CompositeExpression::lt(Version::new(2, 0, 0)))
//!     .or(CompositeExpression::eq(Version::new(3, 0, 0)));
//!
//! assert!(range.interpret_str("1.4.2").unwrap());
//! assert!(range.interpret_str("3.0.0").unwrap());
//! assert!(!range.interpret_str("2.0.0").unwrap());
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::expression::ast::Expression;
use crate::expression::error::ParseError;
use crate::expression::parser::ExpressionParser;
use crate::version::{MalformedVersionError, Version};

/// Wraps one expression root; `and`/`or` rebind the root to a new node that
/// shares the previous root instead of modifying it
#[derive(Debug, Clone)]
pub struct CompositeExpression {
    root: Arc<Expression>,
}

impl CompositeExpression {
    pub fn new(root: impl Into<Arc<Expression>>) -> Self {
        Self { root: root.into() }
    }

    /// Parse a range expression with the default parser
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        ExpressionParser::new().parse(expression).map(Self::new)
    }

    pub fn eq(version: Version) -> Self {
        Self::new(Expression::Equal(version))
    }

    pub fn neq(version: Version) -> Self {
        Self::new(Expression::NotEqual(version))
    }

    pub fn gt(version: Version) -> Self {
        Self::new(Expression::Greater(version))
    }

    pub fn gte(version: Version) -> Self {
        Self::new(Expression::GreaterOrEqual(version))
    }

    pub fn lt(version: Version) -> Self {
        Self::new(Expression::Less(version))
    }

    pub fn lte(version: Version) -> Self {
        Self::new(Expression::LessOrEqual(version))
    }

    pub fn eq_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::eq)
    }

    pub fn neq_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::neq)
    }

    pub fn gt_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::gt)
    }

    pub fn gte_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::gte)
    }

    pub fn lt_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::lt)
    }

    pub fn lte_str(version: &str) -> Result<Self, MalformedVersionError> {
        Version::parse(version).map(Self::lte)
    }

    pub fn not(expression: impl Into<CompositeExpression>) -> Self {
        let expression: CompositeExpression = expression.into();
        Self::new(Expression::Not(expression.root))
    }

    #[must_use]
    pub fn and(self, other: impl Into<CompositeExpression>) -> Self {
        let other: CompositeExpression = other.into();
        Self::new(Expression::And(self.root, other.root))
    }

    #[must_use]
    pub fn or(self, other: impl Into<CompositeExpression>) -> Self {
        let other: CompositeExpression = other.into();
        Self::new(Expression::Or(self.root, other.root))
    }

    pub fn root(&self) -> &Expression {
        &self.root
    }

    pub fn into_expression(self) -> Expression {
        Arc::unwrap_or_clone(self.root)
    }

    pub fn interpret(&self, version: &Version) -> bool {
        self.root.interpret(version)
    }

    /// Parse `version` and interpret it
    pub fn interpret_str(&self, version: &str) -> Result<bool, MalformedVersionError> {
        Ok(self.interpret(&Version::parse(version)?))
    }
}

impl From<Expression> for CompositeExpression {
    fn from(expression: Expression) -> Self {
        Self::new(expression)
    }
}

impl From<Arc<Expression>> for CompositeExpression {
    fn from(expression: Arc<Expression>) -> Self {
        Self::new(expression)
    }
}

impl From<CompositeExpression> for Expression {
    fn from(composite: CompositeExpression) -> Self {
        composite.into_expression()
    }
}

impl BitAnd for CompositeExpression {
    type Output = CompositeExpression;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for CompositeExpression {
    type Output = CompositeExpression;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for CompositeExpression {
    type Output = CompositeExpression;

    fn not(self) -> Self::Output {
        CompositeExpression::not(self)
    }
}

impl fmt::Display for CompositeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
