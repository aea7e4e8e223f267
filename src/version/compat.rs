//! Conversions between [`Version`] and the `semver` crate
//!
//! Lets callers that already hold `semver::Version` values (for example from
//! `Cargo.lock` tooling) evaluate range expressions without re-parsing text.

use crate::version::error::MalformedVersionError;
use crate::version::identifier::Identifier;
use crate::version::semver::Version;

fn join(ids: &[Identifier]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl TryFrom<&semver::Version> for Version {
    type Error = MalformedVersionError;

    /// Fails only for numeric pre-release identifiers wider than 64 bits,
    /// which `semver` accepts as text
    fn try_from(value: &semver::Version) -> Result<Self, Self::Error> {
        let mut version = Version::new(value.major, value.minor, value.patch);
        if !value.pre.is_empty() {
            version = version.with_pre_release(value.pre.as_str())?;
        }
        if !value.build.is_empty() {
            version = version.with_build(value.build.as_str())?;
        }
        Ok(version)
    }
}

impl TryFrom<&Version> for semver::Version {
    type Error = semver::Error;

    fn try_from(value: &Version) -> Result<Self, Self::Error> {
        let mut version = semver::Version::new(value.major(), value.minor(), value.patch());
        version.pre = semver::Prerelease::new(&join(value.pre_release()))?;
        version.build = semver::BuildMetadata::new(&join(value.build()))?;
        Ok(version)
    }
}
