// crates/dns-delegated-core/src/runtime/report.rs
// ============================================================================
// Module: Verification Reports
// Description: Soft-assertion check records and scenario summaries.
// Purpose: Collect every discrepancy from one run into a serializable report.
// Dependencies: serde, time, tracing
// ============================================================================

//! ## Overview
//! Each check appends a [`CheckOutcome`] instead of stopping the run.
//! [`ScenarioReport`] adds the scenario identity, fatal error (if any), and
//! teardown result. A scenario passes only when every check passed, no fatal
//! error occurred, and teardown succeeded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Check Identifiers
// ============================================================================

/// Stable identifiers for every check the runtime performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    /// `default_domain_name` equals `{label}.{primary}`.
    DefaultDomainName,
    /// `default_dns_zone_id` equals the delegated zone id.
    DefaultDnsZoneId,
    /// `route53_hosted_zone_protections` is empty.
    HostedZoneProtectionsEmpty,
    /// Child NS record name is the delegated FQDN.
    ChildNsRecordName,
    /// Child NS record TTL matches the expectation.
    ChildNsRecordTtl,
    /// Parent delegation record name is the delegated FQDN.
    ParentNsRecordName,
    /// Parent delegation record TTL matches the expectation.
    ParentNsRecordTtl,
    /// Child and parent NS sets have the same size.
    NsRecordCount,
    /// Child and parent NS sets hold the same values.
    NsRecordValues,
    /// SSM parameter id is the expected path.
    SsmParameterId,
    /// SSM parameter name is the expected path.
    SsmParameterName,
    /// SSM parameter value equals the certificate ARN.
    SsmValueMatchesCertificate,
    /// Live certificate status satisfies the issuance policy.
    CertificateStatus,
    /// Live certificate type is `AMAZON_ISSUED`.
    CertificateType,
    /// Zone output name servers match the live child NS record.
    ZoneNameServersMatch,
    /// Certificate DNS validation uses a CNAME record.
    ValidationRecordType,
    /// Re-planning with the same inputs yields no changes.
    NoDrift,
    /// A disabled component publishes no outputs.
    DisabledOutputsEmpty,
}

impl CheckId {
    /// Returns the stable label for the check.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DefaultDomainName => "default_domain_name",
            Self::DefaultDnsZoneId => "default_dns_zone_id",
            Self::HostedZoneProtectionsEmpty => "hosted_zone_protections_empty",
            Self::ChildNsRecordName => "child_ns_record_name",
            Self::ChildNsRecordTtl => "child_ns_record_ttl",
            Self::ParentNsRecordName => "parent_ns_record_name",
            Self::ParentNsRecordTtl => "parent_ns_record_ttl",
            Self::NsRecordCount => "ns_record_count",
            Self::NsRecordValues => "ns_record_values",
            Self::SsmParameterId => "ssm_parameter_id",
            Self::SsmParameterName => "ssm_parameter_name",
            Self::SsmValueMatchesCertificate => "ssm_value_matches_certificate",
            Self::CertificateStatus => "certificate_status",
            Self::CertificateType => "certificate_type",
            Self::ZoneNameServersMatch => "zone_name_servers_match",
            Self::ValidationRecordType => "validation_record_type",
            Self::NoDrift => "no_drift",
            Self::DisabledOutputsEmpty => "disabled_outputs_empty",
        }
    }
}

// ============================================================================
// SECTION: Check Outcomes
// ============================================================================

/// Pass/fail status of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Check passed.
    Passed,
    /// Check failed.
    Failed,
}

/// Recorded result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Check identifier.
    pub id: CheckId,
    /// Pass/fail status.
    pub status: CheckStatus,
    /// Expected value, rendered as text.
    pub expected: String,
    /// Observed value, rendered as text.
    pub actual: String,
    /// Optional explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered list of check outcomes for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationReport {
    /// Outcomes in the order checks ran.
    outcomes: Vec<CheckOutcome>,
}

impl VerificationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Records an equality check.
    pub fn record_eq<T>(&mut self, id: CheckId, expected: &T, actual: &T)
    where
        T: PartialEq + Display + ?Sized,
    {
        self.record(id, expected == actual, expected.to_string(), actual.to_string(), None);
    }

    /// Records a check outcome.
    pub fn record(
        &mut self,
        id: CheckId,
        passed: bool,
        expected: impl Into<String>,
        actual: impl Into<String>,
        detail: Option<String>,
    ) {
        let outcome = CheckOutcome {
            id,
            status: if passed { CheckStatus::Passed } else { CheckStatus::Failed },
            expected: expected.into(),
            actual: actual.into(),
            detail,
        };
        if passed {
            tracing::debug!(check = id.as_str(), "check passed");
        } else {
            tracing::warn!(
                check = id.as_str(),
                expected = %outcome.expected,
                actual = %outcome.actual,
                "check failed"
            );
        }
        self.outcomes.push(outcome);
    }

    /// Returns all outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Returns the outcome of `id`, if it ran.
    #[must_use]
    pub fn outcome(&self, id: CheckId) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.id == id)
    }

    /// Returns failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.status == CheckStatus::Failed)
    }

    /// Returns true when every recorded check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

// ============================================================================
// SECTION: Scenario Reports
// ============================================================================

/// Scenario variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Deploy, verify delegation, check drift.
    Delegation,
    /// Deploy with `enabled = false` and verify nothing is published.
    EnabledFlag,
}

/// Fatal error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Harness or fixture setup failed.
    Setup,
    /// Live API call failed unexpectedly.
    Api,
}

/// Fatal error that stopped a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioError {
    /// Error class.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// Result of the scoped teardown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum TeardownStatus {
    /// Nothing was deployed, so nothing was destroyed.
    NotRequired,
    /// Destroy succeeded.
    Succeeded,
    /// Destroy failed.
    Failed(String),
}

/// Full record of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario variant.
    pub scenario: ScenarioKind,
    /// Component under test.
    pub component: String,
    /// Stack under test.
    pub stack: String,
    /// Generated subdomain label.
    pub label: String,
    /// Delegated domain name.
    pub domain: String,
    /// RFC 3339 start time.
    pub started_at: String,
    /// RFC 3339 end time.
    pub finished_at: String,
    /// Check outcomes.
    pub checks: VerificationReport,
    /// Fatal error, if the scenario stopped early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ScenarioError>,
    /// Teardown result.
    pub teardown: TeardownStatus,
}

impl ScenarioReport {
    /// Returns true when all checks passed, no fatal error occurred, and
    /// teardown did not fail.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none()
            && self.checks.passed()
            && !matches!(self.teardown, TeardownStatus::Failed(_))
    }
}

/// Returns the current UTC time in RFC 3339 form.
#[must_use]
pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}
