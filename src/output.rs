//! Pipeline output variables

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Receives the single key/value a run produces
pub trait PipelineOutputSink {
    fn write_output(&self, key: &str, value: &str) -> Result<()>;
}

/// Where GitHub Actions expects step outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append `key=value` lines to the `$GITHUB_OUTPUT` file
    File(PathBuf),
    /// Print the legacy `::set-output` workflow command
    Stdout,
}

/// [PipelineOutputSink] for GitHub Actions
#[derive(Debug, Clone)]
pub struct GithubOutputSink {
    target: OutputTarget,
}

impl GithubOutputSink {
    pub fn new(target: OutputTarget) -> Self {
        GithubOutputSink { target }
    }

    /// Use `$GITHUB_OUTPUT` when the runner provides it, stdout otherwise
    pub fn from_env() -> Self {
        let target = match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => OutputTarget::File(PathBuf::from(path)),
            _ => OutputTarget::Stdout,
        };
        GithubOutputSink { target }
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }
}

impl PipelineOutputSink for GithubOutputSink {
    fn write_output(&self, key: &str, value: &str) -> Result<()> {
        match &self.target {
            OutputTarget::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", key, value)?;
            }
            OutputTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "::set-output name={}::{}", key, value)?;
                handle.flush()?;
            }
        }
        tracing::debug!("Wrote pipeline output {}={}", key, value);
        Ok(())
    }
}

/// Sink that records outputs in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }

    /// Latest value written under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl PipelineOutputSink for MemorySink {
    fn write_output(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_sink_appends_lines() {
        let file = NamedTempFile::new().unwrap();
        let sink = GithubOutputSink::new(OutputTarget::File(file.path().to_path_buf()));

        sink.write_output("ahead", "true").unwrap();
        sink.write_output("version", "1.0.1").unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "ahead=true\nversion=1.0.1\n");
    }

    #[test]
    fn test_file_sink_unwritable_path() {
        let sink = GithubOutputSink::new(OutputTarget::File(PathBuf::from(
            "/nonexistent/dir/github_output",
        )));
        let err = sink.write_output("ahead", "true").unwrap_err();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.write_output("version", "1.0.0").unwrap();
        sink.write_output("version", "1.0.1").unwrap();
        assert_eq!(sink.get("version").as_deref(), Some("1.0.1"));
        assert_eq!(sink.get("ahead"), None);
        assert_eq!(sink.entries().len(), 2);
    }
}
