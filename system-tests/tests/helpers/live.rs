// system-tests/tests/helpers/live.rs
// ============================================================================
// Module: Live Environment
// Description: Wires real Atmos and AWS capabilities into a scenario runner.
// Purpose: Build runners from `dns-delegated.toml` plus system-test env overrides.
// Dependencies: system-tests, dns-delegated-{config, core, providers}
// ============================================================================

//! ## Overview
//! When `DNS_DELEGATED_SYSTEM_TEST_CONFIG` is unset the built-in defaults are
//! used, which target the shared test-automation primary zone in `us-east-2`.

use std::error::Error;

use dns_delegated_config::DnsDelegatedConfig;
use dns_delegated_core::CheckStatus;
use dns_delegated_core::ScenarioReport;
use dns_delegated_core::ScenarioRunner;
use dns_delegated_core::TeardownStatus;
use dns_delegated_providers::AtmosHarness;
use dns_delegated_providers::AwsCloud;
use dns_delegated_providers::RandomLabelGenerator;
use system_tests::config::SystemTestConfig;

/// Real capabilities plus the resolved configuration.
pub struct LiveEnvironment {
    config: DnsDelegatedConfig,
    harness: AtmosHarness,
    cloud: AwsCloud,
    labels: RandomLabelGenerator,
}

impl LiveEnvironment {
    /// Loads configuration, applies env overrides, and builds AWS clients.
    pub fn load() -> Result<Self, Box<dyn Error>> {
        let env = SystemTestConfig::load()?;
        let mut config = match env.config_path.as_deref() {
            Some(path) => DnsDelegatedConfig::load(Some(path))?,
            None => DnsDelegatedConfig::default(),
        };
        if let Some(label) = env.label {
            config.harness.label = Some(label);
        }
        if let Some(drift_check) = env.drift_check {
            config.harness.drift_check = drift_check;
        }
        config.validate()?;

        let cloud = AwsCloud::new(&config.target.region()?)?;
        let harness = AtmosHarness::new(
            config.harness.atmos_binary.clone(),
            config.harness.working_dir.clone(),
        );
        Ok(Self {
            config,
            harness,
            cloud,
            labels: RandomLabelGenerator::default(),
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &DnsDelegatedConfig {
        &self.config
    }

    /// Builds a scenario runner over the live capabilities.
    pub fn runner(&self) -> Result<ScenarioRunner<'_>, Box<dyn Error>> {
        Ok(ScenarioRunner::new(
            &self.harness,
            &self.cloud,
            &self.cloud,
            &self.labels,
            self.config.scenario_settings()?,
        ))
    }
}

/// Summarizes a report into human-readable notes.
pub fn report_notes(report: &ScenarioReport) -> Vec<String> {
    let mut notes = vec![format!("domain {}", report.domain)];
    for outcome in report.checks.outcomes() {
        if outcome.status == CheckStatus::Failed {
            notes.push(format!(
                "{} failed: expected {}, got {}",
                outcome.id.as_str(),
                outcome.expected,
                outcome.actual
            ));
        }
    }
    if let Some(error) = &report.error {
        notes.push(format!("scenario error: {}", error.message));
    }
    if let TeardownStatus::Failed(message) = &report.teardown {
        notes.push(format!("teardown failed: {message}"));
    }
    notes
}
