//! Platform version model used to select extraction strategies.
//!
//! Game platform versions follow a `major.minor[.patch]` scheme such as
//! `1.12.2`. Strategy ranges are keyed on the minor component within a fixed
//! major line, so `1.12` and `1.12.2` fall into the same range.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised when parsing a [`PlatformVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The input was empty after trimming.
    #[error("platform version is empty")]
    Empty,

    /// The input did not have two or three dot-separated numeric components.
    #[error("invalid platform version \"{value}\": expected major.minor[.patch]")]
    InvalidFormat {
        /// The rejected input.
        value: String,
    },
}

/// A parsed `major.minor[.patch]` platform version.
///
/// # Examples
///
/// ```
/// use modmeta_common::PlatformVersion;
///
/// let version: PlatformVersion = "1.12.2".parse().expect("valid version");
/// assert_eq!(version.major(), 1);
/// assert_eq!(version.minor(), 12);
/// assert_eq!(version.patch(), Some(2));
/// assert_eq!(version.to_string(), "1.12.2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformVersion {
    major: u32,
    minor: u32,
    patch: Option<u32>,
}

impl PlatformVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Major component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Minor component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Patch component, when present.
    #[must_use]
    pub const fn patch(&self) -> Option<u32> {
        self.patch
    }
}

impl FromStr for PlatformVersion {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let invalid = || VersionParseError::InvalidFormat {
            value: trimmed.to_owned(),
        };
        let parts = trimmed
            .split('.')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, None)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, Some(*patch))),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<&str> for PlatformVersion {
    type Error = VersionParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{patch}", self.major, self.minor),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// An inclusive range of minor versions within one major line.
///
/// # Examples
///
/// ```
/// use modmeta_common::{PlatformVersion, VersionRange};
///
/// let legacy = VersionRange::between(1, 7, 12);
/// let at = |v: &str| v.parse::<PlatformVersion>().expect("valid version");
/// assert!(legacy.contains(&at("1.12.2")));
/// assert!(!legacy.contains(&at("1.13")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    major: u32,
    min_minor: u32,
    max_minor: Option<u32>,
}

impl VersionRange {
    /// Range covering `min..=max` minor versions of `major`.
    #[must_use]
    pub const fn between(major: u32, min_minor: u32, max_minor: u32) -> Self {
        Self {
            major,
            min_minor,
            max_minor: Some(max_minor),
        }
    }

    /// Open-ended range covering `min` and every later minor version of `major`.
    #[must_use]
    pub const fn at_least(major: u32, min_minor: u32) -> Self {
        Self {
            major,
            min_minor,
            max_minor: None,
        }
    }

    /// Whether `version` falls inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, version: &PlatformVersion) -> bool {
        version.major() == self.major
            && version.minor() >= self.min_minor
            && self.max_minor.is_none_or(|max| version.minor() <= max)
    }

    /// Whether two ranges share at least one minor version.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.major != other.major {
            return false;
        }
        let starts_before_other_ends = other.max_minor.is_none_or(|max| self.min_minor <= max);
        let other_starts_before_end = self.max_minor.is_none_or(|max| other.min_minor <= max);
        starts_before_other_ends && other_starts_before_end
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_minor {
            Some(max) => write!(
                f,
                "{major}.{}-{major}.{max}",
                self.min_minor,
                major = self.major
            ),
            None => write!(f, "{}.{}+", self.major, self.min_minor),
        }
    }
}
