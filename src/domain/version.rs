use crate::error::{AutoversionError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Wraps [`semver::Version`] so prerelease and build metadata survive parsing,
/// while bumps always produce a clean release triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// Parse a version string (e.g., "1.2.3" or "3.0.1-alpha+342")
    ///
    /// A single leading 'v' or 'V' is accepted, so tag-style input like
    /// "v1.2.3" parses the same as "1.2.3".
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        semver::Version::parse(clean)
            .map(Version)
            .map_err(|e| AutoversionError::version(format!("'{}': {}", input, e)))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Whether the version carries a prerelease or build metadata tag
    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty() || !self.0.build.is_empty()
    }

    /// Bump version according to bump type
    ///
    /// Lower components are reset and any prerelease/build metadata is dropped.
    /// A component already at `u64::MAX` stays there.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        match bump_type {
            VersionBump::Major => Version::new(self.major().saturating_add(1), 0, 0),
            VersionBump::Minor => Version::new(self.major(), self.minor().saturating_add(1), 0),
            VersionBump::Patch => Version::new(
                self.major(),
                self.minor(),
                self.patch().saturating_add(1),
            ),
        }
    }

    /// Strip prerelease and build metadata, keeping the numeric triple
    pub fn finalize(&self) -> Self {
        Version::new(self.major(), self.minor(), self.patch())
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::new(0, 0, 0)
    }
}

impl FromStr for Version {
    type Err = AutoversionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}
