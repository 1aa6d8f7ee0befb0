// system-tests/tests/suites/enabled_flag.rs
// ============================================================================
// Module: Enabled Flag Tests
// Description: Deploy the disabled component and verify nothing is published.
// Purpose: Confirm `enabled = false` creates no resources or outputs.
// Dependencies: system-tests helpers
// ============================================================================

//! Live enabled-flag system tests.

use dns_delegated_core::CheckId;
use dns_delegated_core::CheckStatus;
use helpers::artifacts::RunRecorder;
use helpers::live::LiveEnvironment;
use helpers::live::report_notes;

use crate::helpers;

#[test]
fn disabled_component_publishes_no_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let mut recorder = RunRecorder::new("disabled_component_publishes_no_outputs")?;
    let live = LiveEnvironment::load()?;
    let report = live.runner()?.run_enabled_flag();

    let outputs_empty = report
        .checks
        .outcome(CheckId::DisabledOutputsEmpty)
        .is_some_and(|outcome| outcome.status == CheckStatus::Passed);
    if !report.passed() || !outputs_empty {
        recorder.record(&report, "fail")?;
        return Err(
            format!("enabled-flag scenario failed: {}", report_notes(&report).join("; ")).into()
        );
    }

    recorder.record(&report, "pass")?;
    Ok(())
}
