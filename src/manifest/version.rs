//! Version string parsing and precedence.
//!
//! Versions are a numeric dot-separated core of any length, optionally
//! followed by a `-` prerelease suffix (`0.3.2`, `1.0`, `0.5.3-beta.1`).
//! A prerelease sorts before the stable release with the same core.

use crate::{ManifestError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<core>[0-9]+(?:\.[0-9]+)*)(?:-(?P<prerelease>[0-9A-Za-z.-]+))?$")
        .expect("version pattern is valid")
});

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z-]+$").expect("identifier pattern is valid"));

/// One dot-separated prerelease identifier.
///
/// Variant order matters: numeric identifiers have lower precedence than
/// alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

/// A parsed version string
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    core: Vec<u64>,
    prerelease: Option<Vec<Identifier>>,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self> {
        let captures = VERSION_PATTERN.captures(input).ok_or_else(|| invalid(
            input,
            "Use numeric dot notation, optionally with prerelease suffix \
             (example: 0.5.3-beta or 0.5.3-beta.1).",
        ))?;

        let core = captures["core"]
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| invalid(input, &format!("Component '{part}' is out of range.")))
            })
            .collect::<Result<Vec<_>>>()?;

        let prerelease = captures
            .name("prerelease")
            .map(|pre| {
                pre.as_str()
                    .split('.')
                    .map(|identifier| parse_identifier(input, identifier))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            raw: input.to_string(),
            core,
            prerelease,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_identifier(version: &str, identifier: &str) -> Result<Identifier> {
    if identifier.is_empty() {
        return Err(invalid(version, "Prerelease identifier must not be empty."));
    }
    if !IDENTIFIER_PATTERN.is_match(identifier) {
        return Err(invalid(
            version,
            &format!("Invalid prerelease identifier '{identifier}'. Only [0-9A-Za-z-] is allowed."),
        ));
    }
    if identifier.bytes().all(|b| b.is_ascii_digit()) {
        if identifier.len() > 1 && identifier.starts_with('0') {
            return Err(invalid(
                version,
                &format!(
                    "Invalid numeric prerelease identifier '{identifier}': leading zeroes are not allowed."
                ),
            ));
        }
        let value = identifier.parse::<u64>().map_err(|_| {
            invalid(version, &format!("Prerelease identifier '{identifier}' is out of range."))
        })?;
        return Ok(Identifier::Numeric(value));
    }
    Ok(Identifier::AlphaNumeric(identifier.to_string()))
}

fn invalid(version: &str, reason: &str) -> ManifestError {
    ManifestError::InvalidVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Version {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Equality follows precedence, so "1.0" and "1.00" are equal versions even
// though their strings differ.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.core.cmp(&other.core).then_with(|| {
            match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!(v("0.3.2").core, vec![0, 3, 2]);
        assert_eq!(v("1.0").core, vec![1, 0]);
        assert!(v("0.5.3-beta.1").prerelease.is_some());
        assert!(v("10.20.30").prerelease.is_none());
        assert_eq!(v("0.5.3-rc-1").to_string(), "0.5.3-rc-1");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "v1.0.0", "1..0", "1.0.", "1.0.0-", "1.0.0-beta..1", "1.0.0+build", "abc"] {
            let err = Version::parse(bad).unwrap_err();
            assert_eq!(err.kind(), "InvalidVersionError", "{bad} should be rejected");
        }
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        for bad in ["１.０", "0.３.2", "٣.1"] {
            let err = Version::parse(bad).unwrap_err();
            assert_eq!(err.kind(), "InvalidVersionError");
            assert!(err.to_string().contains("numeric dot notation"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_leading_zero_prerelease_rejected() {
        let err = Version::parse("1.0.0-beta.01").unwrap_err();
        assert!(err.to_string().contains("leading zeroes"));
        // A lone zero is fine
        assert!(Version::parse("1.0.0-beta.0").is_ok());
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        assert!(v("0.5.3-beta") < v("0.5.3"));
        assert!(v("0.5.3-beta.1") < v("0.5.3"));
        assert!(v("0.5.2") < v("0.5.3-alpha"));
    }

    #[test]
    fn test_prerelease_identifier_precedence() {
        assert!(v("1.0.0-alpha") < v("1.0.0-alpha.1"));
        assert!(v("1.0.0-alpha.1") < v("1.0.0-alpha.beta"));
        assert!(v("1.0.0-beta.2") < v("1.0.0-beta.11"));
        assert!(v("1.0.0-1") < v("1.0.0-alpha"));
    }

    #[test]
    fn test_core_compares_numerically() {
        assert!(v("0.3.9") < v("0.3.10"));
        assert!(v("0.10.0") > v("0.9.9"));
        assert!(v("1.0") < v("1.0.0"));
        assert_eq!(v("1.0"), v("1.00"));
    }

    #[test]
    fn test_max_picks_highest() {
        let versions = ["0.1.0", "0.3.0-beta", "0.2.5", "0.3.0", "0.2.10"];
        let max = versions.iter().map(|s| v(s)).max().unwrap();
        assert_eq!(max.as_str(), "0.3.0");
    }
}
