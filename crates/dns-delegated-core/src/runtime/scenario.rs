// crates/dns-delegated-core/src/runtime/scenario.rs
// ============================================================================
// Module: Scenario Runner
// Description: Fixture setup, verification, drift check, and scoped teardown.
// Purpose: Drive one delegated-zone scenario end to end through injected capabilities.
// Dependencies: crate::{core, interfaces, runtime}, tracing
// ============================================================================

//! ## Overview
//! A scenario fetches the primary zone, deploys the component under a fresh
//! subdomain label, verifies it, and destroys it. Teardown is owned by a
//! [`DeploymentGuard`] armed immediately before deploy: the guard destroys
//! the component when the scenario returns normally, returns early with an
//! error, or unwinds from a panic.
//!
//! # Invariants
//! - Destroy is attempted at most once per deploy attempt.
//! - Nothing is destroyed when deploy was never attempted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ComponentInputs;
use crate::core::ComponentName;
use crate::core::ComponentTarget;
use crate::core::DomainName;
use crate::core::Expectations;
use crate::core::StackName;
use crate::core::SubdomainLabel;
use crate::core::delegated_domain_name;
use crate::interfaces::CertificateReader;
use crate::interfaces::DeploymentHarness;
use crate::interfaces::DnsRecordReader;
use crate::interfaces::HarnessError;
use crate::interfaces::LabelGenerator;
use crate::runtime::report::CheckId;
use crate::runtime::report::ScenarioError;
use crate::runtime::report::ScenarioKind;
use crate::runtime::report::ScenarioReport;
use crate::runtime::report::TeardownStatus;
use crate::runtime::report::VerificationReport;
use crate::runtime::report::timestamp_now;
use crate::runtime::verifier::DelegationVerifier;
use crate::runtime::verifier::VerificationContext;
use crate::runtime::verifier::VerifyError;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Static inputs shared by every scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSettings {
    /// Pre-existing primary domain.
    pub primary_domain: DomainName,
    /// Atmos stack name.
    pub stack: StackName,
    /// Component deployed by the delegation scenario.
    pub delegated_component: ComponentName,
    /// Component deployed by the enabled-flag scenario.
    pub disabled_component: ComponentName,
    /// Expected TTLs, SSM prefix, and issuance policy.
    pub expectations: Expectations,
    /// Re-plan after verification and require no pending changes.
    pub drift_check: bool,
    /// Fixed label; a fresh label is generated when unset.
    pub label: Option<SubdomainLabel>,
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs delegation and enabled-flag scenarios.
pub struct ScenarioRunner<'a> {
    /// Deployment harness.
    harness: &'a dyn DeploymentHarness,
    /// Route53 reader.
    dns: &'a dyn DnsRecordReader,
    /// ACM reader.
    certificates: &'a dyn CertificateReader,
    /// Subdomain label source.
    labels: &'a dyn LabelGenerator,
    /// Scenario settings.
    settings: ScenarioSettings,
}

impl<'a> ScenarioRunner<'a> {
    /// Creates a runner over the given capabilities.
    #[must_use]
    pub const fn new(
        harness: &'a dyn DeploymentHarness,
        dns: &'a dyn DnsRecordReader,
        certificates: &'a dyn CertificateReader,
        labels: &'a dyn LabelGenerator,
        settings: ScenarioSettings,
    ) -> Self {
        Self {
            harness,
            dns,
            certificates,
            labels,
            settings,
        }
    }

    /// Returns the runner settings.
    #[must_use]
    pub const fn settings(&self) -> &ScenarioSettings {
        &self.settings
    }

    /// Deploys the delegated component, verifies it, checks drift, and tears down.
    #[must_use]
    pub fn run_delegation(&self) -> ScenarioReport {
        let started_at = timestamp_now();
        let label = self.label();
        let target = ComponentTarget::new(
            self.settings.delegated_component.clone(),
            self.settings.stack.clone(),
        );
        let inputs =
            ComponentInputs::single_zone(label.clone(), self.settings.primary_domain.clone());
        tracing::info!(component = %target, label = label.as_str(), "starting delegation scenario");

        let mut checks = VerificationReport::new();
        let mut guard = DeploymentGuard::new(self.harness, &target, &inputs);
        let result = self.delegation_steps(&label, &target, &inputs, &mut guard, &mut checks);
        let teardown = guard.teardown();
        self.finish(ScenarioKind::Delegation, &target, &label, started_at, checks, result, teardown)
    }

    /// Deploys the disabled component with `enabled = false` and requires empty outputs.
    #[must_use]
    pub fn run_enabled_flag(&self) -> ScenarioReport {
        let started_at = timestamp_now();
        let label = self.label();
        let target = ComponentTarget::new(
            self.settings.disabled_component.clone(),
            self.settings.stack.clone(),
        );
        let inputs =
            ComponentInputs::single_zone(label.clone(), self.settings.primary_domain.clone())
                .with_enabled(false);
        tracing::info!(component = %target, label = label.as_str(), "starting enabled-flag scenario");

        let mut checks = VerificationReport::new();
        let mut guard = DeploymentGuard::new(self.harness, &target, &inputs);
        let result = self.enabled_flag_steps(&target, &inputs, &mut guard, &mut checks);
        let teardown = guard.teardown();
        self.finish(ScenarioKind::EnabledFlag, &target, &label, started_at, checks, result, teardown)
    }

    /// Returns the configured label or a freshly generated one.
    fn label(&self) -> SubdomainLabel {
        self.settings.label.clone().unwrap_or_else(|| self.labels.unique_label())
    }

    /// Delegation scenario body; teardown is handled by the caller's guard.
    fn delegation_steps(
        &self,
        label: &SubdomainLabel,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
        guard: &mut DeploymentGuard<'_>,
        checks: &mut VerificationReport,
    ) -> Result<(), VerifyError> {
        let primary_zone = self
            .dns
            .hosted_zone_by_name(&self.settings.primary_domain)
            .map_err(|err| VerifyError::Setup(format!("primary zone lookup failed: {err}")))?;
        tracing::info!(zone_id = primary_zone.id.as_str(), "primary zone located");

        guard.arm();
        self.harness.deploy(target, inputs).map_err(setup_error)?;
        let outputs = self.harness.outputs(target).map_err(setup_error)?;

        let ctx = VerificationContext {
            primary_domain: self.settings.primary_domain.clone(),
            primary_zone,
            label: label.clone(),
        };
        DelegationVerifier::new(self.dns, self.certificates, &self.settings.expectations)
            .verify(&ctx, &outputs, checks)?;

        if self.settings.drift_check {
            tracing::info!(component = %target, "checking for drift");
            let changes = self.harness.plan_has_changes(target, inputs).map_err(setup_error)?;
            checks.record(
                CheckId::NoDrift,
                !changes,
                "no changes",
                if changes { "changes pending" } else { "no changes" },
                None,
            );
        }
        Ok(())
    }

    /// Enabled-flag scenario body; teardown is handled by the caller's guard.
    fn enabled_flag_steps(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
        guard: &mut DeploymentGuard<'_>,
        checks: &mut VerificationReport,
    ) -> Result<(), VerifyError> {
        guard.arm();
        self.harness.deploy(target, inputs).map_err(setup_error)?;
        let outputs = self.harness.outputs(target).map_err(setup_error)?;
        let populated = outputs.populated_keys();
        checks.record(
            CheckId::DisabledOutputsEmpty,
            populated.is_empty(),
            "no populated outputs",
            if populated.is_empty() { "none".to_string() } else { populated.join(", ") },
            None,
        );
        Ok(())
    }

    /// Assembles the final report.
    #[allow(clippy::too_many_arguments, reason = "report assembly takes every scenario field")]
    fn finish(
        &self,
        scenario: ScenarioKind,
        target: &ComponentTarget,
        label: &SubdomainLabel,
        started_at: String,
        checks: VerificationReport,
        result: Result<(), VerifyError>,
        teardown: TeardownStatus,
    ) -> ScenarioReport {
        let error = result.err().map(|err| {
            tracing::error!(error = %err, "scenario aborted");
            ScenarioError {
                kind: err.kind(),
                message: err.message().to_string(),
            }
        });
        let report = ScenarioReport {
            scenario,
            component: target.component.to_string(),
            stack: target.stack.to_string(),
            label: label.to_string(),
            domain: delegated_domain_name(label, &self.settings.primary_domain).to_string(),
            started_at,
            finished_at: timestamp_now(),
            checks,
            error,
            teardown,
        };
        tracing::info!(passed = report.passed(), component = %target, "scenario finished");
        report
    }
}

/// Converts a harness failure into a setup error.
fn setup_error(err: HarnessError) -> VerifyError {
    VerifyError::Setup(err.to_string())
}

// ============================================================================
// SECTION: Teardown Guard
// ============================================================================

/// Destroys a deployed component exactly once, including during unwinding.
pub struct DeploymentGuard<'a> {
    /// Deployment harness.
    harness: &'a dyn DeploymentHarness,
    /// Component to destroy.
    target: &'a ComponentTarget,
    /// Inputs the component was deployed with.
    inputs: &'a ComponentInputs,
    /// True once deploy has been attempted and destroy has not run.
    armed: bool,
}

impl<'a> DeploymentGuard<'a> {
    /// Creates a disarmed guard.
    #[must_use]
    pub const fn new(
        harness: &'a dyn DeploymentHarness,
        target: &'a ComponentTarget,
        inputs: &'a ComponentInputs,
    ) -> Self {
        Self {
            harness,
            target,
            inputs,
            armed: false,
        }
    }

    /// Arms the guard; call before deploying so partial deploys are destroyed.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Destroys the component if armed and reports the result.
    pub fn teardown(&mut self) -> TeardownStatus {
        if !self.armed {
            return TeardownStatus::NotRequired;
        }
        self.armed = false;
        tracing::info!(component = %self.target, "destroying component");
        match self.harness.destroy(self.target, self.inputs) {
            Ok(()) => TeardownStatus::Succeeded,
            Err(err) => {
                tracing::error!(component = %self.target, error = %err, "teardown failed");
                TeardownStatus::Failed(err.to_string())
            }
        }
    }
}

impl Drop for DeploymentGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(
                component = %self.target,
                panicking = std::thread::panicking(),
                "deployment guard dropped while armed; running teardown"
            );
            if let TeardownStatus::Failed(message) = self.teardown() {
                tracing::warn!(
                    component = %self.target,
                    error = %message,
                    "teardown from drop failed"
                );
            }
        }
    }
}
