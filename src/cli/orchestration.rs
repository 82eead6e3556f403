//! Main workflow orchestration logic
//!
//! Gathers the deployed and source versions from their collaborators, runs
//! the decision engine in one of three modes and hands the result to the
//! pipeline output sink. Kept apart from `main.rs` so the workflow can be
//! driven programmatically without clap.

use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{EnvironmentClass, SemanticVersion, VersionPolicy};
use crate::engine::{VersionComparisonResult, VersionDecisionEngine};
use crate::error::{Result, SemverGateError};
use crate::manifest::{ManifestReader, DEFAULT_CHART_PATH};
use crate::output::PipelineOutputSink;
use crate::probe::EnvironmentVersionProbe;
use crate::ui;

/// Output key written by report mode
pub const AHEAD_OUTPUT: &str = "ahead";
/// Output key written by bump mode
pub const VERSION_OUTPUT: &str = "version";

/// How a run treats the engine's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Emit `ahead=true|false`; never fails on "not ahead"
    Report,
    /// Fail with `VersionNotAhead` unless the source is ahead
    HealthCheck,
    /// Emit `version=<next>` without comparing
    Bump,
}

/// Arguments for the workflow
///
/// Mirrors the CLI flags in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    pub mode: RunMode,

    /// Chart manifest holding the source appVersion
    pub chart_path: PathBuf,

    /// Source version given directly; wins over the config and the manifest
    pub source_version: Option<String>,

    /// Deployed version given directly; skips the probe
    pub deployed_version: Option<String>,
}

impl WorkflowArgs {
    pub fn new(mode: RunMode) -> Self {
        WorkflowArgs {
            mode,
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
            source_version: None,
            deployed_version: None,
        }
    }
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub mode: RunMode,
    pub deployed: String,
    /// Absent in bump mode
    pub source: Option<String>,
    /// Report and health-check modes only
    pub ahead: Option<bool>,
    /// Bump mode only
    pub next_version: Option<String>,
}

/// Run one invocation end to end.
///
/// 1. Discover the deployed version (override or probe)
/// 2. Discover the source version (report/health-check only)
/// 3. Apply the mode's policy and write its output
pub fn run_workflow<P, M, S>(
    args: &WorkflowArgs,
    config: &Config,
    probe: &P,
    manifest: &M,
    sink: &S,
    now: NaiveDateTime,
) -> Result<WorkflowResult>
where
    P: EnvironmentVersionProbe + ?Sized,
    M: ManifestReader + ?Sized,
    S: PipelineOutputSink + ?Sized,
{
    let environment = config.environment()?;
    if args.mode == RunMode::Bump {
        environment.ensure_bump_allowed()?;
    }

    let deployed = match args.deployed_version.as_deref() {
        Some(v) => {
            tracing::info!("Using deployed appVersion from the command line: {}", v);
            v.trim().to_string()
        }
        None => discover_deployed(config, probe)?,
    };

    match args.mode {
        RunMode::Report => {
            let source = resolve_source_version(args, config, manifest)?;
            let ahead = report(&deployed, &source, sink)?;
            Ok(WorkflowResult {
                mode: args.mode,
                deployed,
                source: Some(source),
                ahead: Some(ahead),
                next_version: None,
            })
        }
        RunMode::HealthCheck => {
            let source = resolve_source_version(args, config, manifest)?;
            health_check(&deployed, &source)?;
            Ok(WorkflowResult {
                mode: args.mode,
                deployed,
                source: Some(source),
                ahead: Some(true),
                next_version: None,
            })
        }
        RunMode::Bump => {
            let format = config.prerelease_format.as_deref().unwrap_or_default();
            let next = bump(&deployed, &environment, now, format, sink)?;
            Ok(WorkflowResult {
                mode: args.mode,
                deployed,
                source: None,
                ahead: None,
                next_version: Some(next),
            })
        }
    }
}

/// Ask the probe for the deployed version of the configured release
pub fn discover_deployed<P>(config: &Config, probe: &P) -> Result<String>
where
    P: EnvironmentVersionProbe + ?Sized,
{
    let namespace = config
        .namespace
        .as_deref()
        .ok_or_else(|| SemverGateError::config("namespace is not set (HELM_RELEASE_NAMESPACE)"))?;
    let filter = config.release_filter()?;
    probe.deployed_version(namespace, &filter)
}

/// Source version: command line, then configuration, then the chart manifest
pub fn resolve_source_version<M>(args: &WorkflowArgs, config: &Config, manifest: &M) -> Result<String>
where
    M: ManifestReader + ?Sized,
{
    tracing::info!("Discovering appVersion from source...");
    let source = match args
        .source_version
        .as_deref()
        .or(config.release_version.as_deref())
    {
        Some(v) => v.trim().to_string(),
        None => manifest.read_version(&args.chart_path)?,
    };
    tracing::info!("Found appVersion from source: {}", source);
    Ok(source)
}

/// Report mode: write `ahead=true|false` and return the verdict
pub fn report<S>(deployed: &str, source: &str, sink: &S) -> Result<bool>
where
    S: PipelineOutputSink + ?Sized,
{
    let result = verify(deployed, source)?;
    let ahead = result == VersionComparisonResult::Ahead;

    if ahead {
        tracing::info!(
            "The source appVersion \"{}\" is ahead of the deployed appVersion \"{}\".",
            source,
            deployed
        );
    } else {
        tracing::info!(
            "The source appVersion \"{}\" is not ahead of the deployed appVersion \"{}\".",
            source,
            deployed
        );
    }

    sink.write_output(AHEAD_OUTPUT, if ahead { "true" } else { "false" })?;
    Ok(ahead)
}

/// Health-check mode: fail unless the source is strictly ahead
pub fn health_check(deployed: &str, source: &str) -> Result<()> {
    if verify(deployed, source)? != VersionComparisonResult::Ahead {
        return Err(SemverGateError::not_ahead(source, deployed));
    }
    tracing::info!("Source appVersion is correctly ahead of deployed appVersion.");
    Ok(())
}

/// Bump mode: compute the next version for `environment` and write it
pub fn bump<S>(
    deployed: &str,
    environment: &EnvironmentClass,
    now: NaiveDateTime,
    prerelease_format: &str,
    sink: &S,
) -> Result<String>
where
    S: PipelineOutputSink + ?Sized,
{
    environment.ensure_bump_allowed()?;

    let deployed_version = SemanticVersion::parse(deployed)?;
    let next = VersionDecisionEngine::new().next_version(
        &deployed_version,
        environment,
        now,
        prerelease_format,
    )?;

    if environment.policy() == VersionPolicy::Finalize && !deployed_version.is_release() {
        ui::display_boundary_warning(&BoundaryWarning::FinalizingPrerelease {
            deployed: deployed.to_string(),
            next: next.clone(),
        });
    }

    tracing::info!("New appVersion to apply: {}", next);
    ui::display_proposed_version(deployed, &next);
    sink.write_output(VERSION_OUTPUT, &next)?;
    Ok(next)
}

fn verify(deployed: &str, source: &str) -> Result<VersionComparisonResult> {
    tracing::info!("Verifying newer appVersion...");
    let result = VersionDecisionEngine::new().compare_str(deployed, source)?;
    tracing::debug!("Raw semver comparison result: {:?}", result);

    if let Some(warning) = BoundaryWarning::build_metadata_only(deployed.trim(), source.trim()) {
        ui::display_boundary_warning(&warning);
    }
    ui::display_comparison(deployed, source, result);
    Ok(result)
}
