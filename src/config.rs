use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::EnvironmentClass;
use crate::engine::validate_prerelease_format;
use crate::error::{Result, SemverGateError};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "semver-gate.toml";

/// Logging detail requested for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Info,
    Debug,
}

/// Represents the complete configuration for semver-gate.
///
/// Values are layered: configuration file, then environment variables, then
/// command-line flags. Each layer only overrides the keys it sets.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Kubernetes namespace of the release; also selects the environment class
    #[serde(default)]
    pub namespace: Option<String>,

    /// Short form of the namespace used in release names (e.g. "dev")
    #[serde(default)]
    pub namespace_shorthand: Option<String>,

    /// Release name prefix; the probe filter is `{prefix}-{shorthand}`
    #[serde(default)]
    pub release_prefix: Option<String>,

    /// strftime pattern for development pre-release suffixes
    #[serde(default)]
    pub prerelease_format: Option<String>,

    /// Source version given directly instead of read from the manifest
    #[serde(default)]
    pub release_version: Option<String>,

    #[serde(default = "default_helm_bin")]
    pub helm_bin: String,

    #[serde(default)]
    pub debug: bool,
}

fn default_helm_bin() -> String {
    "helm".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: None,
            namespace_shorthand: None,
            release_prefix: None,
            prerelease_format: None,
            release_version: None,
            helm_bin: default_helm_bin(),
            debug: false,
        }
    }
}

/// What a run needs from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements {
    /// The deployed version will be looked up through the probe
    pub probe: bool,
    /// A next version will be computed
    pub bump: bool,
}

impl Config {
    /// Overlay values from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup.
    ///
    /// Recognized variables: `HELM_RELEASE_NAMESPACE`,
    /// `HELM_RELEASE_NAMESPACE_SHORTHAND`, `HELM_RELEASE_PREFIX`,
    /// `PRERELEASE_DATETIME_SUFFIX`, `RELEASE_VERSION`, `HELM_BIN` and
    /// `DEBUG` (`TRUE` turns on debug logging).
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("HELM_RELEASE_NAMESPACE") {
            self.namespace = Some(v);
        }
        if let Some(v) = non_empty("HELM_RELEASE_NAMESPACE_SHORTHAND") {
            self.namespace_shorthand = Some(v);
        }
        if let Some(v) = non_empty("HELM_RELEASE_PREFIX") {
            self.release_prefix = Some(v);
        }
        if let Some(v) = non_empty("PRERELEASE_DATETIME_SUFFIX") {
            self.prerelease_format = Some(v);
        }
        if let Some(v) = non_empty("RELEASE_VERSION") {
            self.release_version = Some(v);
        }
        if let Some(v) = non_empty("HELM_BIN") {
            self.helm_bin = v;
        }
        if let Some(v) = lookup("DEBUG") {
            self.debug = v == "TRUE";
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.debug {
            Verbosity::Debug
        } else {
            Verbosity::Info
        }
    }

    /// Environment class selected by the namespace
    pub fn environment(&self) -> Result<EnvironmentClass> {
        self.namespace
            .as_deref()
            .ok_or_else(|| SemverGateError::config("namespace is not set (HELM_RELEASE_NAMESPACE)"))?
            .parse()
    }

    /// Release name filter handed to the probe
    pub fn release_filter(&self) -> Result<String> {
        let prefix = required(&self.release_prefix, "release prefix (HELM_RELEASE_PREFIX)")?;
        let shorthand = required(
            &self.namespace_shorthand,
            "namespace shorthand (HELM_RELEASE_NAMESPACE_SHORTHAND)",
        )?;
        Ok(format!("{}-{}", prefix, shorthand))
    }

    /// Fail fast on anything the run cannot do without
    pub fn validate(&self, needs: Requirements) -> Result<()> {
        let environment = self.environment()?;

        if needs.bump {
            environment.ensure_bump_allowed()?;
        }

        if needs.probe {
            self.release_filter()?;
        }

        if needs.bump && environment == EnvironmentClass::Development {
            let pattern = required(
                &self.prerelease_format,
                "pre-release timestamp format (PRERELEASE_DATETIME_SUFFIX)",
            )?;
            validate_prerelease_format(pattern)?;
        }

        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SemverGateError::config(format!("{} is not set", what))),
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-gate.toml` in current directory
/// 3. `semver-gate.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// Environment variables are not applied here; see [`Config::apply_env`].
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| SemverGateError::config(format!("invalid configuration file: {}", e)))
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SemverGateError::config(format!("cannot read {}: {}", path.display(), e))
    })
}
