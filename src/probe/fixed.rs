use crate::error::{Result, SemverGateError};
use crate::probe::EnvironmentVersionProbe;

/// Probe that answers with a version known in advance.
///
/// Stands in for Helm in tests and for callers driving the workflow directly.
pub struct FixedProbe {
    version: Option<String>,
}

impl FixedProbe {
    pub fn new(version: impl Into<String>) -> Self {
        FixedProbe {
            version: Some(version.into()),
        }
    }

    /// A probe that finds no release, as for a namespace never deployed to
    pub fn empty() -> Self {
        FixedProbe { version: None }
    }
}

impl EnvironmentVersionProbe for FixedProbe {
    fn deployed_version(&self, namespace: &str, filter: &str) -> Result<String> {
        self.version.clone().ok_or_else(|| {
            SemverGateError::probe(format!(
                "no release matching '{}' in namespace '{}'",
                filter, namespace
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_probe_returns_version() {
        let probe = FixedProbe::new("2.0.0");
        assert_eq!(probe.deployed_version("staging", "app-stg").unwrap(), "2.0.0");
    }

    #[test]
    fn test_empty_probe_fails() {
        let err = FixedProbe::empty()
            .deployed_version("staging", "app-stg")
            .unwrap_err();
        assert!(matches!(err, SemverGateError::Probe(_)));
        assert!(err.to_string().contains("app-stg"));
    }
}
