//! Decision engine for gating deploys and choosing the next version

pub mod decision;

pub use decision::{validate_prerelease_format, VersionComparisonResult, VersionDecisionEngine};
