pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod probe;
pub mod ui;

pub use error::{Result, SemverGateError};
