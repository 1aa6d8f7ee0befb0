// crates/dns-delegated-cli/src/main.rs
// ============================================================================
// Module: DNS Delegated CLI Entry Point
// Description: Command dispatcher for delegated-zone verification runs.
// Purpose: Load config, run a scenario against live AWS, and print the report.
// Dependencies: clap, dns-delegated-{config, core, providers}, thiserror, tracing
// ============================================================================

//! ## Overview
//! `dns-delegated verify` deploys the delegated component under a fresh
//! subdomain, verifies zone delegation, the ACM certificate, and the SSM
//! parameter, then tears the component down. `verify-disabled` deploys the
//! disabled variant and requires empty outputs. Reports go to stdout as JSON
//! or Markdown; logs go to stderr. The exit code is non-zero whenever the
//! report did not pass.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod logging;
mod render;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use dns_delegated_config::DnsDelegatedConfig;
use dns_delegated_config::config_toml_example;
use dns_delegated_core::ScenarioReport;
use dns_delegated_core::ScenarioRunner;
use dns_delegated_core::runtime::ScenarioSettings;
use dns_delegated_providers::AtmosHarness;
use dns_delegated_providers::AwsCloud;
use dns_delegated_providers::RandomLabelGenerator;
use thiserror::Error;

use crate::logging::init_logging;
use crate::render::render_json;
use crate::render::render_markdown;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dns-delegated", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Deploy the delegated component, verify it, check drift, and destroy it.
    Verify(VerifyCommand),
    /// Deploy the disabled component and verify it publishes no outputs.
    VerifyDisabled(VerifyCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a config file.
    Validate(ConfigValidateCommand),
    /// Print the canonical example config.
    Example,
}

/// Arguments for verification commands.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Config file path (defaults to dns-delegated.toml or `DNS_DELEGATED_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
    /// Fixed subdomain label instead of a random one.
    #[arg(long, value_name = "LABEL")]
    label: Option<String>,
    /// Skip the post-verification drift check.
    #[arg(long)]
    skip_drift_check: bool,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to dns-delegated.toml or `DNS_DELEGATED_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for scenario reports.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ReportFormat {
    /// Pretty-printed JSON.
    Json,
    /// Markdown summary with a check table.
    Markdown,
}

/// Scenario selected by a verification command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Scenario {
    /// Delegation scenario.
    Delegation,
    /// Enabled-flag scenario.
    Disabled,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Verify(command) => command_verify(&command, Scenario::Delegation),
        Commands::VerifyDisabled(command) => command_verify(&command, Scenario::Disabled),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Verify Commands
// ============================================================================

/// Executes a verification scenario against live infrastructure.
fn command_verify(command: &VerifyCommand, scenario: Scenario) -> CliResult<ExitCode> {
    let config = load_verify_config(command)?;
    init_logging(&config.logging)
        .map_err(|err| CliError::new(format!("logging setup failed: {err}")))?;
    let settings = config
        .scenario_settings()
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let region = config
        .target
        .region()
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;

    let cloud = AwsCloud::new(&region)
        .map_err(|err| CliError::new(format!("aws client setup failed: {err}")))?;
    let harness =
        AtmosHarness::new(config.harness.atmos_binary.clone(), config.harness.working_dir.clone());
    let labels = RandomLabelGenerator::default();
    tracing::info!(region = region.as_str(), stack = settings.stack.as_str(), "configuration loaded");

    let report = run_scenario(
        &ScenarioRunner::new(&harness, &cloud, &cloud, &labels, settings),
        scenario,
    );
    write_report(&report, command.format)?;
    Ok(exit_code_for(&report))
}

/// Loads config and applies command-line overrides.
fn load_verify_config(command: &VerifyCommand) -> CliResult<DnsDelegatedConfig> {
    let mut config = DnsDelegatedConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    apply_overrides(&mut config, command)?;
    Ok(config)
}

/// Applies `--label` and `--skip-drift-check`, then revalidates.
fn apply_overrides(config: &mut DnsDelegatedConfig, command: &VerifyCommand) -> CliResult<()> {
    if let Some(label) = &command.label {
        config.harness.label = Some(label.clone());
    }
    if command.skip_drift_check {
        config.harness.drift_check = false;
    }
    config.validate().map_err(|err| CliError::new(format!("invalid override: {err}")))
}

/// Runs the selected scenario.
fn run_scenario(runner: &ScenarioRunner<'_>, scenario: Scenario) -> ScenarioReport {
    match scenario {
        Scenario::Delegation => runner.run_delegation(),
        Scenario::Disabled => runner.run_enabled_flag(),
    }
}

/// Renders a report in the requested format.
fn render_report(report: &ScenarioReport, format: ReportFormat) -> CliResult<String> {
    match format {
        ReportFormat::Json => render_json(report)
            .map_err(|err| CliError::new(format!("report serialization failed: {err}"))),
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}

/// Writes a rendered report to stdout.
fn write_report(report: &ScenarioReport, format: ReportFormat) -> CliResult<()> {
    let rendered = render_report(report, format)?;
    write_stdout_line(rendered.trim_end()).map_err(|err| CliError::new(output_error(&err)))
}

/// Maps a report to the process exit code.
fn exit_code_for(report: &ScenarioReport) -> ExitCode {
    if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error(&err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = DnsDelegatedConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let settings = validated_settings(&config)?;
    write_stdout_line(&format!(
        "config ok: {} -> {}.{} (stack {})",
        settings.delegated_component,
        settings.label.as_ref().map_or("<random>", |label| label.as_str()),
        settings.primary_domain,
        settings.stack,
    ))
    .map_err(|err| CliError::new(output_error(&err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves scenario settings and the region from a loaded config.
fn validated_settings(config: &DnsDelegatedConfig) -> CliResult<ScenarioSettings> {
    config.target.region().map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    config.scenario_settings().map_err(|err| CliError::new(format!("config load failed: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(error: &std::io::Error) -> String {
    format!("failed to write to stdout: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
