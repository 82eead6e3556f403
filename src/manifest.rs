//! Source-version discovery from a Helm `Chart.yaml`

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SemverGateError};

/// Default manifest location, relative to the working directory
pub const DEFAULT_CHART_PATH: &str = "Chart.yaml";

/// Reads the declared application version from a packaging manifest
pub trait ManifestReader {
    /// # Returns
    /// * `Ok(String)` - The raw declared version, not yet validated
    /// * `Err` - `ManifestRead` on a missing file, malformed content or no version
    fn read_version(&self, path: &Path) -> Result<String>;
}

/// The slice of `Chart.yaml` semver-gate cares about
#[derive(Debug, Deserialize)]
struct ChartManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "appVersion")]
    app_version: Option<serde_yaml::Value>,
}

/// [ManifestReader] for Helm charts; reads `appVersion`
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartManifestReader;

impl ChartManifestReader {
    pub fn new() -> Self {
        ChartManifestReader
    }

    /// Extract `appVersion` from manifest text
    pub fn parse_app_version(content: &str) -> Result<String> {
        let chart: ChartManifest = serde_yaml::from_str(content)
            .map_err(|e| SemverGateError::manifest(format!("malformed chart manifest: {}", e)))?;

        chart
            .app_version
            .as_ref()
            .and_then(scalar_string)
            .ok_or_else(|| {
                SemverGateError::manifest(format!(
                    "chart '{}' declares no appVersion",
                    chart.name.as_deref().unwrap_or("<unnamed>")
                ))
            })
    }
}

impl ManifestReader for ChartManifestReader {
    fn read_version(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).map_err(|e| {
            SemverGateError::manifest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_app_version(&content)
    }
}

/// Render a YAML scalar as the string an author wrote.
///
/// `appVersion: 1.0` loads as a float and `appVersion: 2` as an integer; both
/// are accepted and turned back into text. Empty strings count as absent.
pub(crate) fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    let text = match value {
        serde_yaml::Value::String(s) => s.trim().to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
