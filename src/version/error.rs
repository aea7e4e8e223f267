use thiserror::Error;

/// Why a version literal was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Nothing to parse
    Empty,
    /// A numeric component is missing or contains non-digits
    InvalidNumber,
    /// A numeric component or numeric pre-release identifier starts with `0`
    LeadingZero,
    /// `1.0.0-` or `1.0.0-alpha..1`
    EmptyIdentifier,
    /// An identifier contains characters outside `[0-9A-Za-z-]`
    InvalidIdentifier,
    /// More than `major.minor.patch`
    TooManyComponents,
    /// A numeric component does not fit in 64 bits
    Overflow,
}

impl MalformedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedReason::Empty => "empty version string",
            MalformedReason::InvalidNumber => "expected a numeric component",
            MalformedReason::LeadingZero => "numeric component has a leading zero",
            MalformedReason::EmptyIdentifier => "empty identifier",
            MalformedReason::InvalidIdentifier => "identifier contains an invalid character",
            MalformedReason::TooManyComponents => "too many numeric components",
            MalformedReason::Overflow => "numeric component is too large",
        }
    }
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed version \"{input}\": {reason}")]
pub struct MalformedVersionError {
    pub input: String,
    pub reason: MalformedReason,
}

impl MalformedVersionError {
    pub fn new(input: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}
