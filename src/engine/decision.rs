use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fmt::Write;

use crate::domain::{EnvironmentClass, SemanticVersion, VersionPolicy};
use crate::error::{Result, SemverGateError};

/// Outcome of comparing the source version against the deployed one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComparisonResult {
    /// Source has strictly greater precedence
    Ahead,
    /// Source sorts below the deployed version
    NotAhead,
    /// Same precedence (build metadata aside)
    Equal,
}

/// Decides whether a source version may ship and what the next version is.
///
/// Holds no state of its own; every operation is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionDecisionEngine;

impl VersionDecisionEngine {
    pub fn new() -> Self {
        VersionDecisionEngine
    }

    /// Compare `source` against `deployed` by semantic-versioning precedence
    pub fn compare(
        &self,
        deployed: &SemanticVersion,
        source: &SemanticVersion,
    ) -> VersionComparisonResult {
        match source.cmp_precedence(deployed) {
            Ordering::Greater => VersionComparisonResult::Ahead,
            Ordering::Equal => VersionComparisonResult::Equal,
            Ordering::Less => VersionComparisonResult::NotAhead,
        }
    }

    /// Parse both strings, then [`compare`](Self::compare)
    pub fn compare_str(&self, deployed: &str, source: &str) -> Result<VersionComparisonResult> {
        let deployed = SemanticVersion::parse(deployed)?;
        let source = SemanticVersion::parse(source)?;
        Ok(self.compare(&deployed, &source))
    }

    pub fn is_ahead(&self, deployed: &SemanticVersion, source: &SemanticVersion) -> bool {
        self.compare(deployed, source) == VersionComparisonResult::Ahead
    }

    pub fn is_ahead_str(&self, deployed: &str, source: &str) -> Result<bool> {
        Ok(self.compare_str(deployed, source)? == VersionComparisonResult::Ahead)
    }

    /// Compute the version to publish next for `environment`.
    ///
    /// The deployed version is finalized; the patch is bumped only when
    /// finalizing left it unchanged, so the result never equals the deployed
    /// release. Development gets a `-pre.<timestamp>` suffix formatted from
    /// `now` with the strftime pattern `prerelease_format`; the result must
    /// parse back as a version, so a numeric timestamp with a leading zero is
    /// rejected.
    pub fn next_version(
        &self,
        deployed: &SemanticVersion,
        environment: &EnvironmentClass,
        now: NaiveDateTime,
        prerelease_format: &str,
    ) -> Result<String> {
        let mut finalized = deployed.finalize();
        if finalized.cmp_precedence(deployed) == Ordering::Equal {
            finalized = finalized.bump_patch()?;
        }

        match environment.policy() {
            VersionPolicy::PrereleaseSuffix => {
                let timestamp = format_timestamp(now, prerelease_format)?;
                let candidate = format!("{}-pre.{}", finalized, timestamp);
                let next = SemanticVersion::parse(&candidate).map_err(|e| {
                    SemverGateError::invalid_version(format!(
                        "timestamp from format '{}' does not form a valid version: {}",
                        prerelease_format, e
                    ))
                })?;
                Ok(next.to_string())
            }
            VersionPolicy::Finalize => Ok(finalized.to_string()),
        }
    }
}

/// Check that `pattern` is a usable strftime pattern
pub fn validate_prerelease_format(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(SemverGateError::config("pre-release timestamp format is empty"));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(SemverGateError::config(format!(
            "invalid pre-release timestamp format: '{}'",
            pattern
        )));
    }
    Ok(())
}

fn format_timestamp(now: NaiveDateTime, pattern: &str) -> Result<String> {
    validate_prerelease_format(pattern)?;

    let mut formatted = String::new();
    write!(formatted, "{}", now.format(pattern)).map_err(|_| {
        SemverGateError::config(format!(
            "timestamp format '{}' cannot be applied to a local date-time",
            pattern
        ))
    })?;

    Ok(formatted)
}
