use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::expression::{ExpressionParser, ParseError};
use crate::version::error::{MalformedReason, MalformedVersionError};
use crate::version::identifier::{
    Identifier, IdentifierKind, increment_identifiers, parse_identifiers, write_identifiers,
};

/// An immutable semantic version
///
/// Precedence follows SemVer 2.0.0: `major`, `minor` and `patch` compare
/// numerically, a pre-release sorts before the same normal version, and build
/// metadata is ignored by `Ord`, `Eq` and `Hash`. Use [`Version::cmp_with_build`]
/// when build metadata must break ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Vec<Identifier>,
    build: Vec<Identifier>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse `major[.minor[.patch]][-pre.release][+build]`
    ///
    /// Missing `minor` and `patch` default to zero, so `"1"` and `"1.0.0"` are
    /// the same version. Numeric components must be `0` or start with a
    /// non-zero digit.
    pub fn parse(text: &str) -> Result<Self, MalformedVersionError> {
        Self::parse_inner(text).map_err(|reason| MalformedVersionError::new(text, reason))
    }

    fn parse_inner(text: &str) -> Result<Self, MalformedReason> {
        if text.is_empty() {
            return Err(MalformedReason::Empty);
        }

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, parse_identifiers(build, IdentifierKind::Build)?),
            None => (text, Vec::new()),
        };
        let (core, pre_release) = match rest.split_once('-') {
            Some((core, pre)) => (core, parse_identifiers(pre, IdentifierKind::PreRelease)?),
            None => (rest, Vec::new()),
        };

        let mut numbers = [0u64; 3];
        for (i, part) in core.split('.').enumerate() {
            let slot = numbers
                .get_mut(i)
                .ok_or(MalformedReason::TooManyComponents)?;
            *slot = parse_numeric(part)?;
        }
        let [major, minor, patch] = numbers;

        Ok(Self {
            major,
            minor,
            patch,
            pre_release,
            build,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre_release(&self) -> &[Identifier] {
        &self.pre_release
    }

    pub fn build(&self) -> &[Identifier] {
        &self.build
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// A version is stable once it reaches `1.0.0` and is not a pre-release
    pub fn is_stable(&self) -> bool {
        self.major > 0 && !self.is_pre_release()
    }

    /// `major.minor.patch` without pre-release or build
    pub fn normal_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Return a copy with the given pre-release identifiers; build metadata is dropped
    pub fn with_pre_release(&self, pre_release: &str) -> Result<Self, MalformedVersionError> {
        let pre_release = parse_identifiers(pre_release, IdentifierKind::PreRelease)
            .map_err(|reason| MalformedVersionError::new(pre_release, reason))?;
        Ok(Self {
            pre_release,
            build: Vec::new(),
            ..self.clone()
        })
    }

    /// Return a copy with the given build metadata
    pub fn with_build(&self, build: &str) -> Result<Self, MalformedVersionError> {
        let build = parse_identifiers(build, IdentifierKind::Build)
            .map_err(|reason| MalformedVersionError::new(build, reason))?;
        Ok(Self {
            build,
            ..self.clone()
        })
    }

    // Increments saturate at u64::MAX instead of wrapping.

    pub fn increment_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    pub fn increment_minor(&self) -> Self {
        Self::new(self.major, self.minor.saturating_add(1), 0)
    }

    pub fn increment_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch.saturating_add(1))
    }

    /// `1.0.0-rc.1` -> `1.0.0-rc.2`, `1.0.0-rc` -> `1.0.0-rc.1`, `1.0.0` -> `1.0.0-1`
    pub fn increment_pre_release(&self) -> Self {
        Self {
            pre_release: increment_identifiers(&self.pre_release),
            build: Vec::new(),
            ..self.clone()
        }
    }

    /// Same rule as [`Version::increment_pre_release`], applied to build metadata
    pub fn increment_build(&self) -> Self {
        Self {
            build: increment_identifiers(&self.build),
            ..self.clone()
        }
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self < other
    }

    pub fn less_than_or_equal_to(&self, other: &Version) -> bool {
        self <= other
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn greater_than_or_equal_to(&self, other: &Version) -> bool {
        self >= other
    }

    /// Total order that also compares build metadata when precedence is equal
    ///
    /// A version without build metadata sorts after the same version with it.
    pub fn cmp_with_build(&self, other: &Version) -> Ordering {
        self.cmp(other)
            .then_with(|| cmp_absent_last(&self.build, &other.build))
    }

    /// Check this version against a range expression such as `^1.2 | 3.x`
    pub fn satisfies(&self, expression: &str) -> Result<bool, ParseError> {
        let expression = ExpressionParser::new().parse(expression)?;
        Ok(expression.interpret(self))
    }
}

fn parse_numeric(part: &str) -> Result<u64, MalformedReason> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedReason::InvalidNumber);
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(MalformedReason::LeadingZero);
    }
    part.parse::<u64>().map_err(|_| MalformedReason::Overflow)
}

/// Compare identifier lists where an empty list outranks any non-empty one
fn cmp_absent_last(a: &[Identifier], b: &[Identifier]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| cmp_absent_last(&self.pre_release, &other.pre_release))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            f.write_str("-")?;
            write_identifiers(f, &self.pre_release)?;
        }
        if !self.build.is_empty() {
            f.write_str("+")?;
            write_identifiers(f, &self.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = MalformedVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = MalformedVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
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
    #[case("1.2.3", (1, 2, 3))]
    #[case("0.0.0", (0, 0, 0))]
    #[case("1", (1, 0, 0))]
    #[case("1.2", (1, 2, 0))]
    #[case("10.20.30", (10, 20, 30))]
    #[case("1.0.0-alpha.1", (1, 0, 0))]
    #[case("1.0.0+build.5", (1, 0, 0))]
    #[case("1.0.0-x-y.z+b-1.002", (1, 0, 0))]
    fn parse_reads_numeric_components(#[case] text: &str, #[case] expected: (u64, u64, u64)) {
        let version = v(text);
        assert_eq!((version.major(), version.minor(), version.patch()), expected);
    }

    #[rstest]
    #[case("", MalformedReason::Empty)]
    #[case("1.", MalformedReason::InvalidNumber)]
    #[case(".1", MalformedReason::InvalidNumber)]
    #[case("1..2", MalformedReason::InvalidNumber)]
    #[case("a.b.c", MalformedReason::InvalidNumber)]
    #[case("v1.2.3", MalformedReason::InvalidNumber)]
    #[case(" 1.2.3", MalformedReason::InvalidNumber)]
    #[case("01.2.3", MalformedReason::LeadingZero)]
    #[case("1.02.3", MalformedReason::LeadingZero)]
    #[case("1.2.3.4", MalformedReason::TooManyComponents)]
    #[case("1.2.3-", MalformedReason::EmptyIdentifier)]
    #[case("1.2.3+", MalformedReason::EmptyIdentifier)]
    #[case("1.2.3-alpha_1", MalformedReason::InvalidIdentifier)]
    #[case("1.2.3-01", MalformedReason::LeadingZero)]
    #[case("18446744073709551616.0.0", MalformedReason::Overflow)]
    fn parse_rejects_malformed_input(#[case] text: &str, #[case] reason: MalformedReason) {
        let err = Version::parse(text).unwrap_err();
        assert_eq!(err, MalformedVersionError::new(text, reason));
    }

    #[test]
    fn pre_release_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[rstest]
    #[case("1.0.0+a", "1.0.0+b")]
    #[case("1.0.0", "1.0.0+build")]
    #[case("1", "1.0.0")]
    fn build_metadata_is_ignored_by_equality(#[case] a: &str, #[case] b: &str) {
        assert_eq!(v(a), v(b));
        assert_eq!(v(a).cmp(&v(b)), Ordering::Equal);
    }

    #[test]
    fn cmp_with_build_breaks_ties() {
        assert_eq!(v("1.0.0+1").cmp_with_build(&v("1.0.0+2")), Ordering::Less);
        assert_eq!(v("1.0.0+build").cmp_with_build(&v("1.0.0")), Ordering::Less);
        assert_eq!(v("1.0.0-rc+z").cmp_with_build(&v("1.0.0+a")), Ordering::Less);
        assert_eq!(v("1.0.0+x").cmp_with_build(&v("1.0.0+x")), Ordering::Equal);
    }

    #[rstest]
    #[case("1.2.3-rc.1+b", "2.0.0", "1.3.0", "1.2.4")]
    #[case("0.0.0", "1.0.0", "0.1.0", "0.0.1")]
    fn increments_reset_lower_components(
        #[case] base: &str,
        #[case] major: &str,
        #[case] minor: &str,
        #[case] patch: &str,
    ) {
        let base = v(base);
        assert_eq!(base.increment_major().to_string(), major);
        assert_eq!(base.increment_minor().to_string(), minor);
        assert_eq!(base.increment_patch().to_string(), patch);
    }

    #[test]
    fn increments_do_not_touch_the_original() {
        let base = v("1.2.3-beta");
        let _ = base.increment_major();
        assert_eq!(base.to_string(), "1.2.3-beta");
    }

    #[rstest]
    #[case("1.0.0", "1.0.0-1")]
    #[case("1.0.0-rc", "1.0.0-rc.1")]
    #[case("1.0.0-rc.1+b.7", "1.0.0-rc.2")]
    fn increment_pre_release(#[case] before: &str, #[case] after: &str) {
        assert_eq!(v(before).increment_pre_release().to_string(), after);
    }

    #[rstest]
    #[case("1.0.0", "1.0.0+1")]
    #[case("1.0.0-rc+build", "1.0.0-rc+build.1")]
    #[case("1.0.0+build.9", "1.0.0+build.10")]
    fn increment_build(#[case] before: &str, #[case] after: &str) {
        assert_eq!(v(before).increment_build().to_string(), after);
    }

    #[test]
    fn with_pre_release_and_build() {
        let base = v("1.2.3+old");
        assert_eq!(base.with_pre_release("beta.1").unwrap().to_string(), "1.2.3-beta.1");
        assert_eq!(base.with_build("sha.5114f85").unwrap().to_string(), "1.2.3+sha.5114f85");
        assert_eq!(
            base.with_pre_release("beta..1").unwrap_err().reason,
            MalformedReason::EmptyIdentifier
        );
    }

    #[rstest]
    #[case("1.0.0", true)]
    #[case("0.9.0", false)]
    #[case("1.0.0-rc.1", false)]
    fn is_stable(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(v(text).is_stable(), expected);
    }

    #[test]
    fn derived_comparisons() {
        let (a, b) = (v("1.0.0"), v("1.0.1"));
        assert!(a.less_than(&b));
        assert!(a.less_than_or_equal_to(&a));
        assert!(b.greater_than(&a));
        assert!(b.greater_than_or_equal_to(&b));
        assert!(!a.greater_than(&b));
    }

    #[test]
    fn display_round_trips() {
        for text in ["1.2.3", "1.0.0-alpha.1+build.007", "0.0.1-x-y"] {
            assert_eq!(v(text).to_string(), text);
        }
        assert_eq!(v("1.2").to_string(), "1.2.0");
        assert_eq!(v("1.2.3-rc+b").normal_version(), "1.2.3");
    }

    #[test]
    fn serde_uses_the_textual_form() {
        let version = v("1.2.3-rc.1");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
        assert_eq!(serde_json::from_str::<Version>(&json).unwrap(), version);
        assert!(serde_json::from_str::<Version>("\"1.x\"").is_err());
    }

    #[rstest]
    #[case("1.4.0", "^1.2.3", true)]
    #[case("2.0.0", "^1.2.3", false)]
    fn satisfies_parses_and_interprets(
        #[case] version: &str,
        #[case] expression: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(v(version).satisfies(expression).unwrap(), expected);
    }

    #[test]
    fn satisfies_surfaces_parse_errors() {
        assert!(v("1.0.0").satisfies(">>1.0.0").is_err());
    }
}
