//! Schema versions of the form `vMAJOR.MINOR.PATCH`.
//!
//! Two versions are compatible when their major and minor numbers agree. The
//! patch number is informational only: a document written by `v0.3.7` of a
//! schema loads fine in code that expects `v0.3.0`, and vice versa.

use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("malformed version '{0}': expected vMAJOR.MINOR.PATCH")]
    Malformed(String),
}

/// A parsed `vMAJOR.MINOR.PATCH` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// How an observed version relates to the version the code expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// Same major.minor; patch may differ in either direction.
    Current,
    /// Written by an older schema series; needs an upgrade.
    Older,
    /// Written by a newer schema series than this code knows about.
    Newer,
}

impl SchemaVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        SchemaVersion {
            major,
            minor,
            patch,
        }
    }

    /// The `(major, minor)` pair that identifies a compatible series.
    pub fn series(&self) -> (u64, u64) {
        (self.major, self.minor)
    }

    /// Compare `observed` against `self`, which is taken to be the baseline.
    pub fn compatibility(&self, observed: &SchemaVersion) -> Compatibility {
        match observed.series().cmp(&self.series()) {
            Ordering::Equal => Compatibility::Current,
            Ordering::Less => Compatibility::Older,
            Ordering::Greater => Compatibility::Newer,
        }
    }

    pub fn is_compatible(&self, observed: &SchemaVersion) -> bool {
        self.compatibility(observed) == Compatibility::Current
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed(s.to_string());
        let captures = VERSION_RE.captures(s).ok_or_else(malformed)?;
        // The regex only admits digits, so the only possible failure is overflow.
        let number = |i: usize| captures[i].parse::<u64>().map_err(|_| malformed());
        Ok(SchemaVersion::new(number(1)?, number(2)?, number(3)?))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Check an observed version string against a required baseline.
///
/// Returns `Ok(true)` when major.minor match, `Ok(false)` when they don't, and
/// an error when `observed` isn't a version at all.
pub fn check(required: &SchemaVersion, observed: &str) -> Result<bool, VersionError> {
    let observed: SchemaVersion = observed.parse()?;
    Ok(required.is_compatible(&observed))
}
