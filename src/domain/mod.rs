//! Domain logic - version values and environment classification, free of I/O

pub mod environment;
pub mod version;

pub use environment::{EnvironmentClass, VersionPolicy};
pub use version::SemanticVersion;
