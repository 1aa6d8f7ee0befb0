// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Scenario Run Records
// Description: Per-test run directories holding scenario reports.
// Purpose: Persist the ScenarioReport and a teardown-first summary per test.
// Dependencies: system-tests, dns-delegated-core, serde_json
// ============================================================================

//! ## Overview
//! Each live test owns a run directory. [`RunRecorder::record`] writes the
//! scenario report as `scenario_report.json` and a Markdown digest as
//! `summary.md`. A recorder dropped without a report (the test panicked or
//! bailed out before the scenario finished) still leaves a digest saying so.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use dns_delegated_core::CheckStatus;
use dns_delegated_core::ScenarioReport;
use dns_delegated_core::TeardownStatus;
use system_tests::config::SystemTestConfig;

/// Writes the run record for one live test.
pub struct RunRecorder {
    root: PathBuf,
    test_name: String,
    recorded: bool,
}

impl RunRecorder {
    /// Creates the run directory under the configured (or default) run root.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let config = SystemTestConfig::load().map_err(io::Error::other)?;
        let root = config.run_root.unwrap_or_else(|| {
            let stamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
            PathBuf::from("target/system-tests").join(format!("run_{stamp}"))
        });
        let root = root.join(test_name);
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            test_name: test_name.to_string(),
            recorded: false,
        })
    }

    /// Writes `report` and its digest; `verdict` names the test's own conclusion.
    pub fn record(&mut self, report: &ScenarioReport, verdict: &str) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(report).map_err(io::Error::other)?;
        fs::write(self.root.join("scenario_report.json"), bytes)?;
        fs::write(self.root.join("summary.md"), self.digest(report, verdict))?;
        self.recorded = true;
        Ok(())
    }

    fn digest(&self, report: &ScenarioReport, verdict: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}: {verdict}\n\n", self.test_name));
        out.push_str(&format!("- Component: {} (stack {})\n", report.component, report.stack));
        out.push_str(&format!("- Domain: {}\n", report.domain));
        out.push_str(&format!("- Window: {} .. {}\n", report.started_at, report.finished_at));
        out.push_str(&format!("- Teardown: {}\n", teardown_text(&report.teardown)));
        if let Some(error) = &report.error {
            out.push_str(&format!("- Error: {}\n", error.message));
        }
        out.push_str("\n## Failed checks\n\n");
        let mut failed = report
            .checks
            .outcomes()
            .iter()
            .filter(|outcome| outcome.status == CheckStatus::Failed)
            .peekable();
        if failed.peek().is_none() {
            out.push_str("- None\n");
        }
        for outcome in failed {
            out.push_str(&format!(
                "- {}: expected `{}`, got `{}`\n",
                outcome.id.as_str(),
                outcome.expected,
                outcome.actual
            ));
        }
        out
    }
}

impl Drop for RunRecorder {
    fn drop(&mut self) {
        if self.recorded {
            return;
        }
        let cause = if std::thread::panicking() { "panicked" } else { "stopped early" };
        let text = format!(
            "# {}: {cause}\n\nNo scenario report was recorded; check the account for a \
             leftover delegated zone.\n",
            self.test_name
        );
        let _ = fs::write(self.root.join("summary.md"), text);
    }
}

fn teardown_text(teardown: &TeardownStatus) -> String {
    match teardown {
        TeardownStatus::NotRequired => "not required".to_string(),
        TeardownStatus::Succeeded => "succeeded".to_string(),
        TeardownStatus::Failed(message) => format!("FAILED: {message}"),
    }
}
