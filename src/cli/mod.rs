//! Command workflows shared by the binary and library callers

pub mod orchestration;

pub use orchestration::{run_workflow, RunMode, WorkflowArgs, WorkflowResult};
