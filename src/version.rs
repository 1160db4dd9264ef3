//! Document format version grammar

use regex::Regex;
use std::sync::LazyLock;

/// Strict SemVer 2.0.0 grammar (semver.org), with ASCII digit classes so
/// the same pattern means the same thing in the exported JSON Schema.
pub const SEMVER_PATTERN: &str = concat!(
    r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
    r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
);

static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEMVER_PATTERN).expect("SEMVER_PATTERN is a valid regex"));

/// Whether `version` is a full `major.minor.patch[-pre][+build]` version
pub fn is_semver(version: &str) -> bool {
    SEMVER_RE.is_match(version)
}

/// Parse a version that already matched [`SEMVER_PATTERN`]
pub fn parse(version: &str) -> Result<semver::Version, semver::Error> {
    semver::Version::parse(version)
}
