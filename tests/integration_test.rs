// tests/integration_test.rs
use regex::Regex;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in `dir` with a clean environment plus `envs`
fn run_in(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_semver-gate"))
        .args(args)
        .current_dir(dir)
        .env_clear()
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to execute semver-gate")
}

fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let dir = TempDir::new().unwrap();
    run_in(dir.path(), args, envs)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const STAGING: &[(&str, &str)] = &[
    ("HELM_RELEASE_NAMESPACE", "staging"),
    ("HELM_RELEASE_NAMESPACE_SHORTHAND", "stg"),
    ("HELM_RELEASE_PREFIX", "portal"),
];

#[test]
fn test_help() {
    let output = run(&["--help"], &[]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("semver-gate"));
    assert!(out.contains("compare"));
    assert!(out.contains("health"));
    assert!(out.contains("bump"));
}

#[test]
fn test_compare_reports_ahead() {
    let output = run(
        &["compare", "--deployed-version", "1.2.3", "--source-version", "1.2.4"],
        STAGING,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("::set-output name=ahead::true"));
}

#[test]
fn test_compare_reports_not_ahead_without_failing() {
    let output = run(
        &["compare", "--deployed-version", "1.3.0", "--source-version", "1.2.9"],
        STAGING,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("::set-output name=ahead::false"));
}

#[test]
fn test_compare_reads_chart_manifest() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("Chart.yaml"),
        "apiVersion: v2\nname: portal\nversion: 0.1.0\nappVersion: \"2.1.0\"\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["compare", "--deployed-version", "2.0.0"], STAGING);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("::set-output name=ahead::true"));
}

#[test]
fn test_compare_missing_manifest_fails() {
    let output = run(&["compare", "--deployed-version", "2.0.0"], STAGING);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Manifest read failed"));
}

#[test]
fn test_health_fails_when_not_ahead() {
    let output = run(
        &["health", "--deployed-version", "2.0.0", "--source-version", "2.0.0"],
        STAGING,
    );
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("not ahead"), "stderr: {}", err);
    assert_eq!(err.matches("\"2.0.0\"").count(), 2, "stderr: {}", err);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_health_passes_when_ahead() {
    let mut envs = STAGING.to_vec();
    envs.push(("RELEASE_VERSION", "2.0.1"));
    let output = run(&["health", "--deployed-version", "2.0.0"], &envs);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_bump_writes_github_output_file() {
    let dir = TempDir::new().unwrap();
    let github_output = dir.path().join("github_output");
    let github_output_str = github_output.to_str().unwrap();

    let mut envs = STAGING.to_vec();
    envs.push(("GITHUB_OUTPUT", github_output_str));
    let output = run_in(dir.path(), &["bump", "--deployed-version", "1.0.0"], &envs);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(&github_output).unwrap(),
        "version=1.0.1\n"
    );
    assert!(!stdout(&output).contains("::set-output"));
}

#[test]
fn test_bump_development_appends_timestamp() {
    let output = run(
        &[
            "--namespace",
            "development",
            "--namespace-shorthand",
            "dev",
            "--release-prefix",
            "portal",
            "--prerelease-format",
            "%Y%m%d%H%M%S",
            "bump",
            "--deployed-version",
            "1.0.5",
        ],
        &[],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let shape = Regex::new(r"(?m)^::set-output name=version::1\.0\.6-pre\.\d{14}$").unwrap();
    assert!(shape.is_match(&stdout(&output)), "stdout: {}", stdout(&output));
}

#[test]
fn test_bump_development_requires_format() {
    let output = run(
        &["--namespace", "development", "bump", "--deployed-version", "1.0.5"],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("PRERELEASE_DATETIME_SUFFIX"));
}

#[test]
fn test_bump_refuses_production() {
    let output = run(
        &["--namespace", "production", "bump", "--deployed-version", "1.0.0"],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("production"));
}

#[test]
fn test_bump_refuses_production_before_helm() {
    let output = run(
        &["--namespace", "production", "bump"],
        &[("HELM_BIN", "/nonexistent/helm")],
    );
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Unsupported environment"), "stderr: {}", err);
    assert!(!err.contains("Environment probe failed"));
}

#[test]
fn test_malformed_version_fails_gracefully() {
    let output = run(
        &["compare", "--deployed-version", "not-a-version", "--source-version", "1.0.0"],
        STAGING,
    );
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Invalid version format"), "stderr: {}", err);
    assert!(err.contains("not-a-version"));
    assert!(!err.contains("panicked"));
}

#[test]
fn test_missing_namespace_fails_fast() {
    let output = run(
        &["compare", "--deployed-version", "1.0.0", "--source-version", "1.0.1"],
        &[],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("HELM_RELEASE_NAMESPACE"));
}

#[test]
fn test_probe_failure_when_helm_missing() {
    let mut envs = STAGING.to_vec();
    envs.push(("HELM_BIN", "/nonexistent/helm"));
    let output = run(&["compare", "--source-version", "1.0.0"], &envs);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Environment probe failed"));
}
