use std::fmt;

/// Warnings about version inputs that are legal but worth a second look.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Versions differ only in build metadata, which precedence ignores
    BuildMetadataOnly { deployed: String, source: String },
    /// The deployed version is a pre-release and will be finalized in place
    FinalizingPrerelease { deployed: String, next: String },
}

impl BoundaryWarning {
    /// Detect versions that are distinct strings but equal in precedence
    pub fn build_metadata_only(deployed: &str, source: &str) -> Option<Self> {
        let strip = |v: &str| v.split('+').next().unwrap_or(v).to_string();
        if deployed != source && strip(deployed) == strip(source) {
            Some(BoundaryWarning::BuildMetadataOnly {
                deployed: deployed.to_string(),
                source: source.to_string(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::BuildMetadataOnly { deployed, source } => {
                write!(
                    f,
                    "Source '{}' and deployed '{}' differ only in build metadata",
                    source, deployed
                )
            }
            BoundaryWarning::FinalizingPrerelease { deployed, next } => {
                write!(
                    f,
                    "Deployed '{}' is a pre-release; finalizing to '{}' without a patch bump",
                    deployed, next
                )
            }
        }
    }
}
