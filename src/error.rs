use thiserror::Error;

/// Unified error type for semver-gate operations
#[derive(Error, Debug)]
pub enum SemverGateError {
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Environment probe failed: {0}")]
    Probe(String),

    #[error("Manifest read failed: {0}")]
    ManifestRead(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "The source appVersion \"{source_version}\" is not ahead of the deployed appVersion \"{deployed}\". Update the source and try again."
    )]
    VersionNotAhead {
        source_version: String,
        deployed: String,
    },

    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-gate
pub type Result<T> = std::result::Result<T, SemverGateError>;

impl SemverGateError {
    /// Create an invalid version error naming the offending input
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        SemverGateError::InvalidVersionFormat(msg.into())
    }

    /// Create a probe error with context
    pub fn probe(msg: impl Into<String>) -> Self {
        SemverGateError::Probe(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        SemverGateError::ManifestRead(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverGateError::Config(msg.into())
    }

    /// Create an unsupported environment error
    pub fn unsupported_environment(msg: impl Into<String>) -> Self {
        SemverGateError::UnsupportedEnvironment(msg.into())
    }

    /// Create the health-check gate failure for a source that is not ahead
    pub fn not_ahead(source_version: impl Into<String>, deployed: impl Into<String>) -> Self {
        SemverGateError::VersionNotAhead {
            source_version: source_version.into(),
            deployed: deployed.into(),
        }
    }

    /// Whether this error is the deliberate health-check gate rather than a fault
    pub fn is_gate_failure(&self) -> bool {
        matches!(self, SemverGateError::VersionNotAhead { .. })
    }

    /// Process exit code: `1` for the health-check gate, `2` for everything else
    pub fn exit_code(&self) -> i32 {
        if self.is_gate_failure() {
            1
        } else {
            2
        }
    }
}
