use serde::Deserialize;

/// Number of tokens in `major.minor.patch`; the disambiguator never scans
/// further than this past the start of a range
pub const LOOKAHEAD_LIMIT: usize = 5;

/// Deepest accepted nesting of `(` and `!(` groups
pub const MAX_NESTING_DEPTH: usize = 128;

/// Environment variable holding the `tracing` filter used by the CLI
pub const LOG_FILTER_ENV: &str = "SEMVER_EXPR_LOG";

/// Filter applied when [`LOG_FILTER_ENV`] is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Engine configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub parser: ParserConfig,
}

/// Parser-related configuration
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    pub tilde_zero_minor: TildeZeroMinor,
}

/// Upper bound of `~0.0.patch`
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TildeZeroMinor {
    /// `~0.0.3` is `>=0.0.3 & <0.0.4`
    #[default]
    PinPatch,
    /// `~0.0.3` is `>=0.0.3 & <0.1.0`, the same minor window as any other tilde range
    MinorWindow,
}
