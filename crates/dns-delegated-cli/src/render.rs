// crates/dns-delegated-cli/src/render.rs
// ============================================================================
// Module: Report Rendering
// Description: JSON and Markdown renderings of scenario reports.
// Purpose: Produce the stdout payload for verification commands.
// Dependencies: dns-delegated-core, serde_json
// ============================================================================

//! ## Overview
//! JSON output is the serialized [`ScenarioReport`]. Markdown output is a
//! short summary followed by one table row per check; pipe characters in
//! values are escaped so rows stay aligned.

use std::fmt::Write;

use dns_delegated_core::CheckStatus;
use dns_delegated_core::ScenarioReport;
use dns_delegated_core::TeardownStatus;
use dns_delegated_core::runtime::ErrorKind;

/// Renders `report` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(report: &ScenarioReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Renders `report` as a Markdown summary.
#[must_use]
pub fn render_markdown(report: &ScenarioReport) -> String {
    let mut output = String::new();
    let status = if report.passed() { "PASSED" } else { "FAILED" };
    let _ = writeln!(output, "# dns-delegated verification: {status}");
    output.push('\n');
    let _ = writeln!(output, "- Component: `{}` (stack `{}`)", report.component, report.stack);
    let _ = writeln!(output, "- Domain: `{}`", report.domain);
    let _ = writeln!(output, "- Started: {}", report.started_at);
    let _ = writeln!(output, "- Finished: {}", report.finished_at);
    let _ = writeln!(output, "- Teardown: {}", teardown_label(&report.teardown));
    if let Some(error) = &report.error {
        let kind = match error.kind {
            ErrorKind::Setup => "setup",
            ErrorKind::Api => "api",
        };
        let _ = writeln!(output, "- Error ({kind}): {}", escape_cell(&error.message));
    }
    output.push('\n');

    let outcomes = report.checks.outcomes();
    if outcomes.is_empty() {
        output.push_str("No checks ran.\n");
        return output;
    }
    output.push_str("| Check | Status | Expected | Actual | Detail |\n");
    output.push_str("| --- | --- | --- | --- | --- |\n");
    for outcome in outcomes {
        let status = match outcome.status {
            CheckStatus::Passed => "pass",
            CheckStatus::Failed => "FAIL",
        };
        let _ = writeln!(
            output,
            "| {} | {status} | {} | {} | {} |",
            outcome.id.as_str(),
            escape_cell(&outcome.expected),
            escape_cell(&outcome.actual),
            escape_cell(outcome.detail.as_deref().unwrap_or("")),
        );
    }
    output
}

/// Returns a short teardown description.
fn teardown_label(teardown: &TeardownStatus) -> String {
    match teardown {
        TeardownStatus::NotRequired => "not required".to_string(),
        TeardownStatus::Succeeded => "succeeded".to_string(),
        TeardownStatus::Failed(message) => format!("failed ({})", escape_cell(message)),
    }
}

/// Escapes table separators and flattens newlines.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
