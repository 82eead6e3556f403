use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SemverGateError};

/// Deployment environment, selected from the release namespace name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentClass {
    Development,
    Staging,
    Production,
    Other(String),
}

/// How the next version is shaped for an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPolicy {
    /// `{finalized}-pre.{timestamp}`
    PrereleaseSuffix,
    /// Plain release string
    Finalize,
}

impl EnvironmentClass {
    /// Classify a namespace name. Matching is exact, as in the pipeline inputs.
    pub fn from_namespace(namespace: &str) -> Self {
        match namespace {
            "development" => EnvironmentClass::Development,
            "staging" => EnvironmentClass::Staging,
            "production" => EnvironmentClass::Production,
            other => EnvironmentClass::Other(other.to_string()),
        }
    }

    pub fn policy(&self) -> VersionPolicy {
        match self {
            EnvironmentClass::Development => VersionPolicy::PrereleaseSuffix,
            _ => VersionPolicy::Finalize,
        }
    }

    /// Bump mode must never publish straight into production
    pub fn allows_bump(&self) -> bool {
        !matches!(self, EnvironmentClass::Production)
    }

    /// [`allows_bump`](Self::allows_bump) as an error
    pub fn ensure_bump_allowed(&self) -> Result<()> {
        if self.allows_bump() {
            Ok(())
        } else {
            Err(SemverGateError::unsupported_environment(format!(
                "bump mode is not appropriate for the {} environment",
                self
            )))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EnvironmentClass::Development => "development",
            EnvironmentClass::Staging => "staging",
            EnvironmentClass::Production => "production",
            EnvironmentClass::Other(name) => name,
        }
    }
}

impl FromStr for EnvironmentClass {
    type Err = SemverGateError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(SemverGateError::config("environment name is empty"));
        }
        Ok(EnvironmentClass::from_namespace(s.trim()))
    }
}

impl fmt::Display for EnvironmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
