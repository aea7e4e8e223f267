//! Expression tree and its interpreter
//!
//! Range sugar (`^`, `~`, `-`, `x`, partial versions) never reaches this
//! level: the parser expands it into the six comparisons joined with `And`.
//! Composite nodes share their children through `Arc`, so combining two
//! expressions never copies or mutates either subtree, and a tree can be
//! interpreted from many threads at once.

use std::fmt;
use std::mem;
use std::sync::{Arc, LazyLock};

use crate::version::Version;

static PLACEHOLDER: LazyLock<Arc<Expression>> =
    LazyLock::new(|| Arc::new(Expression::Equal(Version::new(0, 0, 0))));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Equal(Version),
    NotEqual(Version),
    Greater(Version),
    GreaterOrEqual(Version),
    Less(Version),
    LessOrEqual(Version),
    And(Arc<Expression>, Arc<Expression>),
    Or(Arc<Expression>, Arc<Expression>),
    Not(Arc<Expression>),
}

impl Expression {
    pub fn and(left: impl Into<Arc<Expression>>, right: impl Into<Arc<Expression>>) -> Self {
        Expression::And(left.into(), right.into())
    }

    pub fn or(left: impl Into<Arc<Expression>>, right: impl Into<Arc<Expression>>) -> Self {
        Expression::Or(left.into(), right.into())
    }

    pub fn not(inner: impl Into<Arc<Expression>>) -> Self {
        Expression::Not(inner.into())
    }

    /// `[lower, upper)`
    pub(crate) fn half_open(lower: Version, upper: Version) -> Self {
        Expression::and(Expression::GreaterOrEqual(lower), Expression::Less(upper))
    }

    /// `[lower, upper]`
    pub(crate) fn closed(lower: Version, upper: Version) -> Self {
        Expression::and(Expression::GreaterOrEqual(lower), Expression::LessOrEqual(upper))
    }

    /// Whether `version` satisfies this expression
    ///
    /// `&`/`|` chains are walked along their right operands in a loop, so
    /// recursion depth follows the nesting of left operands only.
    pub fn interpret(&self, version: &Version) -> bool {
        let mut node = self;
        loop {
            match node {
                Expression::Equal(v) => return version == v,
                Expression::NotEqual(v) => return version != v,
                Expression::Greater(v) => return version > v,
                Expression::GreaterOrEqual(v) => return version >= v,
                Expression::Less(v) => return version < v,
                Expression::LessOrEqual(v) => return version <= v,
                Expression::And(left, right) => {
                    if !left.interpret(version) {
                        return false;
                    }
                    node = right.as_ref();
                }
                Expression::Or(left, right) => {
                    if left.interpret(version) {
                        return true;
                    }
                    node = right.as_ref();
                }
                Expression::Not(inner) => return !inner.interpret(version),
            }
        }
    }

    /// Move the children out, leaving shared placeholders behind
    fn take_children(&mut self, pending: &mut Vec<Arc<Expression>>) {
        match self {
            Expression::And(left, right) | Expression::Or(left, right) => {
                pending.push(mem::replace(left, Arc::clone(&PLACEHOLDER)));
                pending.push(mem::replace(right, Arc::clone(&PLACEHOLDER)));
            }
            Expression::Not(inner) => pending.push(mem::replace(inner, Arc::clone(&PLACEHOLDER))),
            _ => {}
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Expression::Equal(_) => "=",
            Expression::NotEqual(_) => "!=",
            Expression::Greater(_) => ">",
            Expression::GreaterOrEqual(_) => ">=",
            Expression::Less(_) => "<",
            Expression::LessOrEqual(_) => "<=",
            Expression::And(..) => "&",
            Expression::Or(..) => "|",
            Expression::Not(_) => "!",
        }
    }

    /// Write `child` as an operand of `self`, parenthesizing a nested
    /// combinator whose operator differs from the parent's
    fn write_operand(&self, f: &mut fmt::Formatter<'_>, child: &Expression) -> fmt::Result {
        let needs_parens = matches!(child, Expression::And(..) | Expression::Or(..))
            && child.operator() != self.operator();
        if needs_parens {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

/// Canonical text; parses back to an equivalent expression as long as the
/// versions carry no pre-release or build identifiers
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Equal(v)
            | Expression::NotEqual(v)
            | Expression::Greater(v)
            | Expression::GreaterOrEqual(v)
            | Expression::Less(v)
            | Expression::LessOrEqual(v) => write!(f, "{}{v}", self.operator()),
            Expression::And(..) | Expression::Or(..) => {
                let mut node = self;
                loop {
                    match node {
                        Expression::And(left, right) | Expression::Or(left, right)
                            if node.operator() == self.operator() =>
                        {
                            self.write_operand(f, left)?;
                            write!(f, " {} ", self.operator())?;
                            node = right.as_ref();
                        }
                        _ => return self.write_operand(f, node),
                    }
                }
            }
            Expression::Not(inner) => write!(f, "!({inner})"),
        }
    }
}

// Dropping a long chain node by node would recurse once per level
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(child) = pending.pop() {
            if let Some(mut inner) = Arc::into_inner(child) {
                inner.take_children(&mut pending);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[rstest]
    #[case(Expression::Equal(v("1.0.0")), "1.0.0", true)]
    #[case(Expression::Equal(v("1.0.0")), "1.0.0+build", true)]
    #[case(Expression::Equal(v("1.0.0")), "1.0.1", false)]
    #[case(Expression::NotEqual(v("1.0.0")), "1.0.1", true)]
    #[case(Expression::NotEqual(v("1.0.0")), "1.0.0", false)]
    #[case(Expression::Greater(v("1.0.0")), "1.0.1", true)]
    #[case(Expression::Greater(v("1.0.0")), "1.0.0", false)]
    #[case(Expression::GreaterOrEqual(v("1.0.0")), "1.0.0", true)]
    #[case(Expression::GreaterOrEqual(v("1.0.0")), "1.0.0-rc.1", false)]
    #[case(Expression::Less(v("1.0.0")), "1.0.0-rc.1", true)]
    #[case(Expression::Less(v("1.0.0")), "1.0.0", false)]
    #[case(Expression::LessOrEqual(v("1.0.0")), "1.0.0", true)]
    #[case(Expression::LessOrEqual(v("1.0.0")), "1.0.1", false)]
    fn comparisons(#[case] expression: Expression, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(expression.interpret(&v(version)), expected);
    }

    #[test]
    fn combinators() {
        let range = Expression::half_open(v("1.0.0"), v("2.0.0"));
        assert!(range.interpret(&v("1.5.0")));
        assert!(!range.interpret(&v("2.0.0")));

        let negated = Expression::not(range.clone());
        assert!(!negated.interpret(&v("1.5.0")));
        assert!(negated.interpret(&v("2.0.0")));

        let either = Expression::or(range, Expression::Equal(v("3.0.0")));
        assert!(either.interpret(&v("3.0.0")));
        assert!(!either.interpret(&v("2.5.0")));
    }

    #[test]
    fn combining_shares_subtrees() {
        let shared = Arc::new(Expression::closed(v("1.0.0"), v("2.0.0")));
        let combined = Expression::or(shared.clone(), Expression::Equal(v("3.0.0")));
        let Expression::Or(left, _) = &combined else {
            panic!("expected Or");
        };
        assert!(Arc::ptr_eq(left, &shared));
    }

    #[test]
    fn display_parenthesizes_mixed_combinators() {
        let a = Expression::GreaterOrEqual(v("1.0.0"));
        let b = Expression::Less(v("2.0.0"));
        let c = Expression::Equal(v("3.0.0"));

        let and_then_or = Expression::or(Expression::and(a.clone(), b.clone()), c.clone());
        assert_eq!(and_then_or.to_string(), "(>=1.0.0 & <2.0.0) | =3.0.0");

        let chained = Expression::and(a.clone(), Expression::and(b.clone(), c.clone()));
        assert_eq!(chained.to_string(), ">=1.0.0 & <2.0.0 & =3.0.0");

        let negated = Expression::not(Expression::or(a, b));
        assert_eq!(negated.to_string(), "!(>=1.0.0 | <2.0.0)");
    }

    #[test]
    fn long_chains_interpret_display_and_drop() {
        let mut chain = Expression::Equal(Version::new(0, 0, 0));
        for major in 1..100_000 {
            chain = Expression::or(Expression::Equal(Version::new(major, 0, 0)), chain);
        }
        assert!(chain.interpret(&Version::new(0, 0, 0)));
        assert!(!chain.interpret(&Version::new(0, 1, 0)));
        assert!(chain.to_string().ends_with("=1.0.0 | =0.0.0"));
    }

    #[test]
    fn dropping_keeps_shared_children_alive() {
        let shared = Arc::new(Expression::closed(v("1.0.0"), v("2.0.0")));
        drop(Expression::not(Arc::clone(&shared)));
        assert_eq!(shared.to_string(), ">=1.0.0 & <=2.0.0");
    }

    #[test]
    fn interpretation_is_thread_safe() {
        let range = Arc::new(Expression::half_open(v("1.0.0"), v("2.0.0")));
        let handles: Vec<_> = (0..4u64)
            .map(|minor| {
                let range = Arc::clone(&range);
                std::thread::spawn(move || range.interpret(&Version::new(1, minor, 0)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
