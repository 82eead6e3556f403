use regex::Regex;
use serde::Deserialize;
use std::process::Command;

use crate::error::{Result, SemverGateError};
use crate::manifest::scalar_string;
use crate::probe::EnvironmentVersionProbe;

/// One entry of `helm list --output yaml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HelmRelease {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chart: Option<String>,
    #[serde(default)]
    pub app_version: Option<serde_yaml::Value>,
}

/// Probe backed by the Helm CLI
pub struct HelmProbe {
    helm_bin: String,
}

impl HelmProbe {
    /// Create a probe that invokes `helm_bin` (a name on PATH or a path)
    pub fn new(helm_bin: impl Into<String>) -> Self {
        HelmProbe {
            helm_bin: helm_bin.into(),
        }
    }

    fn list_releases(&self, namespace: &str, filter: &str) -> Result<String> {
        let output = Command::new(&self.helm_bin)
            .args(["list", "-n", namespace, "--filter", filter, "--output", "yaml"])
            .output()
            .map_err(|e| {
                SemverGateError::probe(format!("failed to run {}: {}", self.helm_bin, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SemverGateError::probe(format!(
                "{} list failed with exit code {}\nStderr: {}",
                self.helm_bin,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl EnvironmentVersionProbe for HelmProbe {
    fn deployed_version(&self, namespace: &str, filter: &str) -> Result<String> {
        tracing::info!(
            "Discovering deployed appVersion for Helm release {} in the {} namespace...",
            filter,
            namespace
        );
        let raw = self.list_releases(namespace, filter)?;
        tracing::debug!("Raw result from Helm:\n{}", raw);

        let version = app_version_from_listing(&raw, filter)?;
        tracing::info!("Found deployed appVersion: {}", version);
        Ok(version)
    }
}

/// Pick the `app_version` of the first release in a Helm YAML listing whose
/// name matches `filter` (a regex, as Helm treats it).
pub fn app_version_from_listing(listing: &str, filter: &str) -> Result<String> {
    let releases: Vec<HelmRelease> = if listing.trim().is_empty() {
        Vec::new()
    } else {
        serde_yaml::from_str(listing)
            .map_err(|e| SemverGateError::probe(format!("unreadable Helm output: {}", e)))?
    };

    let pattern = Regex::new(filter).map_err(|e| {
        SemverGateError::probe(format!("invalid release filter '{}': {}", filter, e))
    })?;

    let release = releases
        .iter()
        .find(|r| pattern.is_match(&r.name))
        .ok_or_else(|| SemverGateError::probe(format!("no Helm release matches '{}'", filter)))?;

    match release.app_version.as_ref().and_then(scalar_string) {
        Some(v) => Ok(v),
        None => Err(SemverGateError::probe(format!(
            "Helm release '{}' has no app_version",
            release.name
        ))),
    }
}
