//! Four-part platform versions (`major.minor.build.revision`).
//!
//! Windows SDKs and appx manifests identify platform releases with dotted
//! four-component versions such as `10.0.10240.0`. Unlike semver, every
//! component is significant and ordering is purely component-wise.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// The baseline UAP platform version (Windows 10 RTM).
pub const BASE_UAP_VERSION: Version = Version::new(10, 0, 10240, 0);

/// Error returned when a string is not a dotted numeric version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{input}`: {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: &'static str,
}

/// A platform version with exactly four components.
///
/// Missing components are normalized to zero on parse, so `10.0` and
/// `10.0.0.0` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    parts: [u32; 4],
}

impl Version {
    /// Create a version from its four components.
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Version {
            parts: [major, minor, build, revision],
        }
    }

    /// Parse a version, returning `None` for malformed input.
    pub fn try_parse(s: &str) -> Option<Version> {
        s.parse().ok()
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| VersionParseError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(fail("empty string"));
        }

        let components: Vec<&str> = trimmed.split('.').collect();
        if components.len() > 4 {
            return Err(fail("more than four components"));
        }

        let mut parts = [0u32; 4];
        for (slot, component) in parts.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail("components must be non-negative integers"));
            }
            *slot = component
                .parse()
                .map_err(|_| fail("component out of range"))?;
        }

        Ok(Version { parts })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, build, revision] = self.parts;
        write!(f, "{}.{}.{}.{}", major, minor, build, revision)
    }
}

static DOT_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\d").unwrap());

/// Pad a descriptor version to four components.
///
/// The Windows packager rejects versions such as `1.2`, so any version that
/// already contains a `.<digit>` group is padded with `.0` until it has four
/// components. Versions without a separator (`"1"`) are returned unchanged,
/// as are versions that already have four or more groups.
pub fn pad_version(version: &str) -> String {
    let groups = DOT_DIGIT.find_iter(version).count();
    if groups == 0 {
        return version.to_string();
    }

    let mut padded = version.to_string();
    for _ in (groups + 1)..4 {
        padded.push_str(".0");
    }
    padded
}
