use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use semver_gate::cli::{run_workflow, RunMode, WorkflowArgs};
use semver_gate::config::{self, Config, Requirements};
use semver_gate::logging;
use semver_gate::manifest::{ChartManifestReader, DEFAULT_CHART_PATH};
use semver_gate::output::GithubOutputSink;
use semver_gate::probe::HelmProbe;
use semver_gate::ui;
use semver_gate::SemverGateError;

#[derive(Parser, Debug)]
#[command(
    name = "semver-gate",
    version,
    about = "Gate deploys on semantic versions and compute the next appVersion"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Release namespace (HELM_RELEASE_NAMESPACE)")]
    namespace: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Namespace shorthand used in release names (HELM_RELEASE_NAMESPACE_SHORTHAND)"
    )]
    namespace_shorthand: Option<String>,

    #[arg(long, global = true, help = "Release name prefix (HELM_RELEASE_PREFIX)")]
    release_prefix: Option<String>,

    #[arg(
        long,
        global = true,
        help = "strftime pattern for development pre-release suffixes (PRERELEASE_DATETIME_SUFFIX)"
    )]
    prerelease_format: Option<String>,

    #[arg(long, global = true, help = "Enable debug logging (DEBUG=TRUE)")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether the source appVersion is ahead (writes `ahead`)
    Compare(VersionArgs),
    /// Fail unless the source appVersion is ahead of the deployed one
    Health(VersionArgs),
    /// Compute the next appVersion for the environment (writes `version`)
    Bump(DeployedArgs),
}

#[derive(clap::Args, Debug)]
struct VersionArgs {
    #[arg(long, default_value = DEFAULT_CHART_PATH, help = "Chart manifest to read appVersion from")]
    chart: PathBuf,

    #[arg(long, help = "Source appVersion, instead of reading the chart (RELEASE_VERSION)")]
    source_version: Option<String>,

    #[command(flatten)]
    deployed: DeployedArgs,
}

#[derive(clap::Args, Debug)]
struct DeployedArgs {
    #[arg(long, help = "Deployed appVersion, instead of querying Helm")]
    deployed_version: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(v) = &self.namespace {
            config.namespace = Some(v.clone());
        }
        if let Some(v) = &self.namespace_shorthand {
            config.namespace_shorthand = Some(v.clone());
        }
        if let Some(v) = &self.release_prefix {
            config.release_prefix = Some(v.clone());
        }
        if let Some(v) = &self.prerelease_format {
            config.prerelease_format = Some(v.clone());
        }
        if self.debug {
            config.debug = true;
        }
    }

    fn workflow_args(&self) -> WorkflowArgs {
        match &self.command {
            Command::Compare(v) | Command::Health(v) => {
                let mode = if matches!(self.command, Command::Compare(_)) {
                    RunMode::Report
                } else {
                    RunMode::HealthCheck
                };
                WorkflowArgs {
                    mode,
                    chart_path: v.chart.clone(),
                    source_version: v.source_version.clone(),
                    deployed_version: v.deployed.deployed_version.clone(),
                }
            }
            Command::Bump(d) => WorkflowArgs {
                deployed_version: d.deployed_version.clone(),
                ..WorkflowArgs::new(RunMode::Bump)
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

/// Exit code for a failed run; errors from outside the library count as faults
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SemverGateError>()
        .map_or(2, SemverGateError::exit_code)
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    config.apply_env();
    args.apply_overrides(&mut config);

    logging::init_logging(config.verbosity());

    let workflow_args = args.workflow_args();
    config
        .validate(Requirements {
            probe: workflow_args.deployed_version.is_none(),
            bump: workflow_args.mode == RunMode::Bump,
        })
        .context("Invalid configuration")?;
    tracing::debug!("Effective configuration: {:?}", config);

    let probe = HelmProbe::new(config.helm_bin.clone());
    let sink = GithubOutputSink::from_env();
    let now = chrono::Local::now().naive_local();

    let result = run_workflow(
        &workflow_args,
        &config,
        &probe,
        &ChartManifestReader::new(),
        &sink,
        now,
    )?;

    if result.mode == RunMode::HealthCheck {
        ui::display_success("Source appVersion is ahead; deploy may proceed");
    }

    Ok(())
}
