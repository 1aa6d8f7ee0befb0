// crates/dns-delegated-providers/src/atmos.rs
// ============================================================================
// Module: Atmos Deployment Harness
// Description: Deploys, plans, reads, and destroys components via `atmos terraform`.
// Purpose: Implement the core deployment harness over the Atmos CLI.
// Dependencies: dns-delegated-core, tempfile, tracing
// ============================================================================

//! ## Overview
//! Every operation renders an `atmos terraform <subcommand> <component> -s
//! <stack>` invocation. Inputs are written to a temporary JSON var file that
//! lives for the duration of one command. Commands run through a
//! [`CommandRunner`] so tests can substitute scripted results.
//!
//! Plan uses `-detailed-exitcode`: status 0 means no changes, 2 means changes
//! are pending, anything else is a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use dns_delegated_core::ComponentInputs;
use dns_delegated_core::ComponentOutputs;
use dns_delegated_core::ComponentTarget;
use dns_delegated_core::DeploymentHarness;
use dns_delegated_core::HarnessError;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum stderr bytes kept in error messages.
const MAX_STDERR_BYTES: usize = 4 * 1024;
/// Plan exit status when changes are pending.
const PLAN_CHANGES_STATUS: i32 = 2;

// ============================================================================
// SECTION: Command Runner
// ============================================================================

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
    /// Working directory, or the current directory when unset.
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    /// Renders the command line for logs and error messages.
    #[must_use]
    pub fn display(&self) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, or `None` when terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

/// Executes external commands.
pub trait CommandRunner {
    /// Runs the command to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Spawn`] when the command cannot be started.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, HarnessError>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, HarnessError> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .map_err(|err| HarnessError::Spawn(format!("{}: {err}", spec.program)))?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

// ============================================================================
// SECTION: Atmos Harness
// ============================================================================

/// Deployment harness backed by the Atmos CLI.
pub struct AtmosHarness<R = ProcessRunner> {
    /// Command runner.
    runner: R,
    /// Atmos executable name or path.
    binary: String,
    /// Working directory for every command.
    working_dir: Option<PathBuf>,
}

impl AtmosHarness<ProcessRunner> {
    /// Creates a harness that spawns real processes.
    #[must_use]
    pub fn new(binary: impl Into<String>, working_dir: Option<PathBuf>) -> Self {
        Self::with_runner(ProcessRunner, binary, working_dir)
    }
}

impl<R: CommandRunner> AtmosHarness<R> {
    /// Creates a harness over a custom command runner.
    #[must_use]
    pub fn with_runner(runner: R, binary: impl Into<String>, working_dir: Option<PathBuf>) -> Self {
        Self {
            runner,
            binary: binary.into(),
            working_dir,
        }
    }

    /// Returns the command runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds an `atmos terraform` command for `target`.
    fn command(&self, subcommand: &str, target: &ComponentTarget, extra: &[&str]) -> CommandSpec {
        let mut args = vec![
            "terraform".to_string(),
            subcommand.to_string(),
            target.component.to_string(),
            "-s".to_string(),
            target.stack.to_string(),
        ];
        args.extend(extra.iter().map(|arg| (*arg).to_string()));
        CommandSpec {
            program: self.binary.clone(),
            args,
            working_dir: self.working_dir.clone(),
        }
    }

    /// Runs a command and returns its output with the exit status.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput, HarnessError> {
        tracing::info!(command = %spec.display(), "running atmos");
        self.runner.run(spec)
    }

    /// Runs a command that must exit with status 0.
    fn execute_checked(&self, spec: &CommandSpec) -> Result<CommandOutput, HarnessError> {
        let output = self.execute(spec)?;
        ensure_success(spec, &output)?;
        Ok(output)
    }

    /// Runs a subcommand that consumes the inputs var file.
    ///
    /// The var file is removed when this returns.
    fn execute_with_inputs(
        &self,
        subcommand: &str,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
        extra: &[&str],
    ) -> Result<(CommandSpec, CommandOutput), HarnessError> {
        let var_file = write_var_file(inputs)?;
        let var_path = path_arg(var_file.path())?;
        let mut args = vec!["-var-file", var_path.as_str()];
        args.extend_from_slice(extra);
        let spec = self.command(subcommand, target, &args);
        let output = self.execute(&spec)?;
        Ok((spec, output))
    }
}

impl<R: CommandRunner> DeploymentHarness for AtmosHarness<R> {
    fn deploy(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<(), HarnessError> {
        let (spec, output) = self.execute_with_inputs("deploy", target, inputs, &[])?;
        ensure_success(&spec, &output)
    }

    fn destroy(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<(), HarnessError> {
        let (spec, output) =
            self.execute_with_inputs("destroy", target, inputs, &["-auto-approve"])?;
        ensure_success(&spec, &output)
    }

    fn outputs(&self, target: &ComponentTarget) -> Result<ComponentOutputs, HarnessError> {
        let spec = self.command("output", target, &["-no-color", "-json"]);
        let output = self.execute_checked(&spec)?;
        let document = extract_json_document(&output.stdout);
        ComponentOutputs::from_terraform_json(document)
            .map_err(|err| HarnessError::Output(err.to_string()))
    }

    fn plan_has_changes(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<bool, HarnessError> {
        let (spec, output) = self.execute_with_inputs(
            "plan",
            target,
            inputs,
            &["-no-color", "-detailed-exitcode"],
        )?;
        match output.status {
            Some(0) => Ok(false),
            Some(PLAN_CHANGES_STATUS) => Ok(true),
            _ => Err(command_failed(&spec, &output)),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes inputs to a temporary `.json` var file.
fn write_var_file(inputs: &ComponentInputs) -> Result<NamedTempFile, HarnessError> {
    let payload = inputs.to_var_file_json().map_err(|err| HarnessError::Io(err.to_string()))?;
    let mut file = tempfile::Builder::new()
        .prefix("dns-delegated-vars-")
        .suffix(".json")
        .tempfile()
        .map_err(|err| HarnessError::Io(err.to_string()))?;
    file.write_all(&payload).map_err(|err| HarnessError::Io(err.to_string()))?;
    file.flush().map_err(|err| HarnessError::Io(err.to_string()))?;
    Ok(file)
}

/// Converts a path into a command argument.
fn path_arg(path: &Path) -> Result<String, HarnessError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| HarnessError::Io("var file path is not valid utf-8".to_string()))
}

/// Fails unless the command exited with status 0.
fn ensure_success(spec: &CommandSpec, output: &CommandOutput) -> Result<(), HarnessError> {
    if output.status == Some(0) { Ok(()) } else { Err(command_failed(spec, output)) }
}

/// Builds a command failure error with truncated stderr.
fn command_failed(spec: &CommandSpec, output: &CommandOutput) -> HarnessError {
    HarnessError::CommandFailed {
        command: spec.display(),
        status: output
            .status
            .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {code}")),
        stderr: truncate_tail(&String::from_utf8_lossy(&output.stderr), MAX_STDERR_BYTES),
    }
}

/// Keeps the last `max` bytes of `text` on a char boundary.
pub(crate) fn truncate_tail(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= max {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - max;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &trimmed[start ..])
}

/// Returns the JSON object in `stdout`, skipping any Atmos log lines before it.
pub(crate) fn extract_json_document(stdout: &[u8]) -> &[u8] {
    let trimmed = stdout.trim_ascii();
    if trimmed.first() == Some(&b'{') {
        return trimmed;
    }
    let start = trimmed
        .windows(2)
        .position(|pair| pair == b"\n{")
        .map_or(trimmed.len(), |index| index + 1);
    &trimmed[start ..]
}
