use crate::error::{Result, SemverGateError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    inner: semver::Version,
}

impl SemanticVersion {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parse a version string, e.g. "1.2.3-pre.4+build.5"
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        semver::Version::parse(trimmed)
            .map(|inner| SemanticVersion { inner })
            .map_err(|e| SemverGateError::invalid_version(format!("'{}': {}", input, e)))
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release label, if any (without the leading '-')
    pub fn prerelease(&self) -> Option<&str> {
        if self.inner.pre.is_empty() {
            None
        } else {
            Some(self.inner.pre.as_str())
        }
    }

    /// Build metadata, if any (without the leading '+')
    pub fn build(&self) -> Option<&str> {
        if self.inner.build.is_empty() {
            None
        } else {
            Some(self.inner.build.as_str())
        }
    }

    /// True when the version carries no pre-release label
    pub fn is_release(&self) -> bool {
        self.inner.pre.is_empty()
    }

    /// Strip pre-release and build components
    pub fn finalize(&self) -> Self {
        SemanticVersion::new(self.inner.major, self.inner.minor, self.inner.patch)
    }

    /// Increment the patch component, dropping pre-release and build
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self.inner.patch.checked_add(1).ok_or_else(|| {
            SemverGateError::invalid_version(format!("'{}': patch cannot be incremented", self))
        })?;
        Ok(SemanticVersion::new(self.inner.major, self.inner.minor, patch))
    }

    /// Compare by semantic-versioning precedence.
    ///
    /// Build metadata never participates; a pre-release sorts below its release.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        let lhs = &self.inner;
        let rhs = &other.inner;
        (lhs.major, lhs.minor, lhs.patch, &lhs.pre).cmp(&(rhs.major, rhs.minor, rhs.patch, &rhs.pre))
    }
}

impl FromStr for SemanticVersion {
    type Err = SemverGateError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), 3);
        assert_eq!(v.prerelease(), None);
        assert_eq!(v.build(), None);
    }

    #[test]
    fn test_version_parse_full() {
        let v = SemanticVersion::parse("1.2.3-pre.20240101+sha.abc").unwrap();
        assert_eq!(v.prerelease(), Some("pre.20240101"));
        assert_eq!(v.build(), Some("sha.abc"));
        assert!(!v.is_release());
    }

    #[test]
    fn test_version_parse_trims_whitespace() {
        let v = SemanticVersion::parse(" 1.2.3\n").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_invalid() {
        for input in ["not-a-version", "1.2", "v1.2.3", "1.2.3.4", "", "1.2.x"] {
            let err = SemanticVersion::parse(input).unwrap_err();
            assert!(matches!(err, SemverGateError::InvalidVersionFormat(_)));
            assert!(err.to_string().contains(&format!("'{}'", input)));
        }
    }

    #[test]
    fn test_finalize_strips_prerelease_and_build() {
        let v = SemanticVersion::parse("2.4.1-rc.1+build.7").unwrap();
        assert_eq!(v.finalize(), SemanticVersion::new(2, 4, 1));
    }

    #[test]
    fn test_bump_patch() {
        let v = SemanticVersion::new(1, 2, 3);
        assert_eq!(v.bump_patch().unwrap(), SemanticVersion::new(1, 2, 4));
    }

    #[test]
    fn test_bump_patch_overflow() {
        let v = SemanticVersion::parse("0.0.18446744073709551615").unwrap();
        let err = v.bump_patch().unwrap_err();
        assert!(matches!(err, SemverGateError::InvalidVersionFormat(_)));
        assert!(err.to_string().contains("0.0.18446744073709551615"));
    }

    #[test]
    fn test_prerelease_sorts_below_release() {
        let pre = SemanticVersion::parse("1.2.0-pre.1").unwrap();
        let rel = SemanticVersion::parse("1.2.0").unwrap();
        assert_eq!(pre.cmp_precedence(&rel), Ordering::Less);
        assert_eq!(rel.cmp_precedence(&pre), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_identifier_ordering() {
        let a = SemanticVersion::parse("1.0.0-alpha").unwrap();
        let b = SemanticVersion::parse("1.0.0-alpha.1").unwrap();
        let c = SemanticVersion::parse("1.0.0-beta.2").unwrap();
        let d = SemanticVersion::parse("1.0.0-beta.11").unwrap();
        assert_eq!(a.cmp_precedence(&b), Ordering::Less);
        assert_eq!(b.cmp_precedence(&c), Ordering::Less);
        assert_eq!(c.cmp_precedence(&d), Ordering::Less);
    }

    #[test]
    fn test_build_metadata_ignored_for_precedence() {
        let a = SemanticVersion::parse("1.0.0+linux").unwrap();
        let b = SemanticVersion::parse("1.0.0+darwin").unwrap();
        assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_version_display() {
        let v = SemanticVersion::parse("1.2.3-pre.1+b").unwrap();
        assert_eq!(v.to_string(), "1.2.3-pre.1+b");
        assert_eq!(SemanticVersion::new(0, 1, 0).to_string(), "0.1.0");
    }

    #[test]
    fn test_from_str() {
        let v: SemanticVersion = "3.0.0".parse().unwrap();
        assert_eq!(v, SemanticVersion::new(3, 0, 0));
    }
}
