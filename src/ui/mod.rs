//! User interface module - status output for pipeline logs.

pub mod formatter;

pub use formatter::{
    comparison_summary, display_boundary_warning, display_comparison, display_error,
    display_proposed_version, display_status, display_success,
};
