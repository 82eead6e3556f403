//! Deployed-version discovery
//!
//! The [EnvironmentVersionProbe] trait abstracts "what is live right now" so
//! the workflow can run against a real cluster or a fixed value:
//!
//! - [helm::HelmProbe]: queries `helm list` for the release
//! - [fixed::FixedProbe]: returns a version supplied up front
//!
//! ```rust
//! # use semver_gate::probe::{EnvironmentVersionProbe, FixedProbe};
//! let probe = FixedProbe::new("1.4.2");
//! let deployed = probe.deployed_version("staging", "portal-stg").unwrap();
//! assert_eq!(deployed, "1.4.2");
//! ```

pub mod fixed;
pub mod helm;

pub use fixed::FixedProbe;
pub use helm::HelmProbe;

use crate::error::Result;

/// Source of the version currently deployed in an environment
pub trait EnvironmentVersionProbe {
    /// Look up the deployed version string.
    ///
    /// # Arguments
    /// * `namespace` - Namespace the release lives in
    /// * `filter` - Release name filter, `{prefix}-{shorthand}`
    ///
    /// # Returns
    /// * `Ok(String)` - The raw deployed version, not yet validated
    /// * `Err` - `Probe` when the query fails or no release matches
    fn deployed_version(&self, namespace: &str, filter: &str) -> Result<String>;
}
