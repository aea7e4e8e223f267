//! Dot-separated pre-release and build identifiers
//!
//! Ordering follows SemVer 2.0.0 §11:
//! - numeric identifiers compare numerically
//! - alphanumeric identifiers compare lexically in ASCII order
//! - numeric identifiers always have lower precedence than alphanumeric ones
//! - a shorter list that is a prefix of a longer one has lower precedence
//!
//! The derived `Ord` on [`Identifier`] and on `[Identifier]` gives exactly
//! these rules: the `Numeric` variant is declared first, and slices compare
//! element-wise with the shorter prefix first.

use std::fmt;

use crate::version::error::MalformedReason;

/// A single identifier of a pre-release or build list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    /// Digits only, without a leading zero (`1`, `42`)
    Numeric(u64),
    /// Anything else from `[0-9A-Za-z-]` (`alpha`, `x-1`, and `007` in build metadata)
    AlphaNumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

/// Which part of the version an identifier list belongs to
///
/// Pre-release identifiers reject numeric leading zeros; build identifiers keep
/// them verbatim as alphanumeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdentifierKind {
    PreRelease,
    Build,
}

/// Parse a dot-separated identifier list such as `alpha.1` or `build.007`
pub(crate) fn parse_identifiers(
    text: &str,
    kind: IdentifierKind,
) -> Result<Vec<Identifier>, MalformedReason> {
    text.split('.').map(|part| parse_identifier(part, kind)).collect()
}

fn parse_identifier(part: &str, kind: IdentifierKind) -> Result<Identifier, MalformedReason> {
    if part.is_empty() {
        return Err(MalformedReason::EmptyIdentifier);
    }
    if !part.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(MalformedReason::InvalidIdentifier);
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Identifier::AlphaNumeric(part.to_string()));
    }

    let has_leading_zero = part.len() > 1 && part.starts_with('0');
    match kind {
        IdentifierKind::PreRelease if has_leading_zero => Err(MalformedReason::LeadingZero),
        IdentifierKind::Build if has_leading_zero => Ok(Identifier::AlphaNumeric(part.to_string())),
        _ => part
            .parse::<u64>()
            .map(Identifier::Numeric)
            .map_err(|_| MalformedReason::Overflow),
    }
}

/// Increment the last numeric identifier, or append `1` when the list is empty
/// or ends with an alphanumeric identifier
pub(crate) fn increment_identifiers(ids: &[Identifier]) -> Vec<Identifier> {
    let mut next = ids.to_vec();
    match next.last_mut() {
        Some(Identifier::Numeric(n)) => *n = n.saturating_add(1),
        _ => next.push(Identifier::Numeric(1)),
    }
    next
}

/// Write identifiers joined with `.`
pub(crate) fn write_identifiers(f: &mut fmt::Formatter<'_>, ids: &[Identifier]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        write!(f, "{id}")?;
    }
    Ok(())
}
