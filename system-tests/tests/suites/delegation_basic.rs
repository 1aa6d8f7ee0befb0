// system-tests/tests/suites/delegation_basic.rs
// ============================================================================
// Module: Delegation Basic Tests
// Description: Deploy the delegated component and verify it end to end.
// Purpose: Confirm zone delegation, certificate, SSM parameter, and no drift.
// Dependencies: system-tests helpers
// ============================================================================

//! Live delegation system tests.

use dns_delegated_core::CheckId;
use dns_delegated_core::TeardownStatus;
use helpers::artifacts::RunRecorder;
use helpers::live::LiveEnvironment;
use helpers::live::report_notes;

use crate::helpers;

/// Checks every delegation run must record.
const REQUIRED_CHECKS: [CheckId; 9] = [
    CheckId::DefaultDomainName,
    CheckId::DefaultDnsZoneId,
    CheckId::HostedZoneProtectionsEmpty,
    CheckId::ChildNsRecordTtl,
    CheckId::ParentNsRecordTtl,
    CheckId::NsRecordValues,
    CheckId::SsmValueMatchesCertificate,
    CheckId::CertificateStatus,
    CheckId::CertificateType,
];

#[test]
fn delegated_zone_verifies_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut recorder = RunRecorder::new("delegated_zone_verifies_end_to_end")?;
    let live = LiveEnvironment::load()?;
    let report = live.runner()?.run_delegation();

    let failure = if !report.passed() {
        Some(format!("delegation scenario failed: {}", report_notes(&report).join("; ")))
    } else {
        let missing: Vec<&str> = REQUIRED_CHECKS
            .iter()
            .filter(|id| report.checks.outcome(**id).is_none())
            .map(|id| id.as_str())
            .collect();
        if !missing.is_empty() {
            Some(format!("checks did not run: {}", missing.join(", ")))
        } else if live.config().harness.drift_check
            && report.checks.outcome(CheckId::NoDrift).is_none()
        {
            Some("drift check enabled but not recorded".to_string())
        } else if report.teardown != TeardownStatus::Succeeded {
            Some("component was not destroyed".to_string())
        } else {
            None
        }
    };

    recorder.record(&report, failure.as_deref().map_or("pass", |_| "fail"))?;
    match failure {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}
