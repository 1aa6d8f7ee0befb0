// crates/dns-delegated-core/src/runtime/verifier.rs
// ============================================================================
// Module: Delegation Verifier
// Description: Cross-checks component outputs against live Route53 and ACM.
// Purpose: Record every delegation discrepancy as a soft assertion.
// Dependencies: crate::{core, interfaces}, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`DelegationVerifier::verify`] derives the expected delegated domain from
//! the primary domain and subdomain label, then runs its checks in a fixed
//! order. Mismatches and missing entries are recorded in the
//! [`VerificationReport`] and later checks still run. Output documents that
//! cannot be decoded abort with [`VerifyError::Setup`]; live API failures
//! abort with [`VerifyError::Api`].
//!
//! # Invariants
//! - Checks run in the order listed in [`CheckId`].
//! - A single live lookup is made per record set; the certificate is
//!   described by the ARN stored in the SSM parameter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::core::Certificate;
use crate::core::CertificateType;
use crate::core::ComponentOutputs;
use crate::core::DomainName;
use crate::core::Expectations;
use crate::core::HostedZoneRef;
use crate::core::IssuancePolicy;
use crate::core::OutputError;
use crate::core::RecordSet;
use crate::core::RecordType;
use crate::core::SsmParameter;
use crate::core::SubdomainLabel;
use crate::core::Zone;
use crate::core::ZoneId;
use crate::core::delegated_domain_name;
use crate::core::fully_qualified;
use crate::core::is_empty_value;
use crate::core::output_keys;
use crate::core::ssm_parameter_path;
use crate::interfaces::CertificateReader;
use crate::interfaces::CloudError;
use crate::interfaces::DnsRecordReader;
use crate::runtime::nameservers::compare_name_servers;
use crate::runtime::report::CheckId;
use crate::runtime::report::ErrorKind;
use crate::runtime::report::VerificationReport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Actual value recorded when an output entry or live record is absent.
pub const MISSING: &str = "<missing>";

/// Record type ACM uses for DNS validation.
const VALIDATION_RECORD_TYPE: &str = "CNAME";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal verification errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Fixture or output setup failed.
    #[error("setup error: {0}")]
    Setup(String),
    /// Live API call failed unexpectedly.
    #[error("api error: {0}")]
    Api(String),
}

impl VerifyError {
    /// Returns the error class recorded in scenario reports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Setup(_) => ErrorKind::Setup,
            Self::Api(_) => ErrorKind::Api,
        }
    }

    /// Returns the error message without the class prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Setup(message) | Self::Api(message) => message,
        }
    }
}

impl From<OutputError> for VerifyError {
    fn from(err: OutputError) -> Self {
        Self::Setup(err.to_string())
    }
}

impl From<CloudError> for VerifyError {
    fn from(err: CloudError) -> Self {
        Self::Api(err.to_string())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Inputs of one verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationContext {
    /// Pre-existing primary domain.
    pub primary_domain: DomainName,
    /// Primary hosted zone, fetched during fixture setup.
    pub primary_zone: HostedZoneRef,
    /// Subdomain label deployed for this run.
    pub label: SubdomainLabel,
}

impl VerificationContext {
    /// Returns the delegated domain `{label}.{primary}`.
    #[must_use]
    pub fn delegated_domain(&self) -> DomainName {
        delegated_domain_name(&self.label, &self.primary_domain)
    }
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Verifies one deployed delegated zone.
pub struct DelegationVerifier<'a> {
    /// Route53 reader.
    dns: &'a dyn DnsRecordReader,
    /// ACM reader.
    certificates: &'a dyn CertificateReader,
    /// Expected TTLs, paths, and issuance policy.
    expectations: &'a Expectations,
}

impl<'a> DelegationVerifier<'a> {
    /// Creates a verifier over the given readers.
    #[must_use]
    pub const fn new(
        dns: &'a dyn DnsRecordReader,
        certificates: &'a dyn CertificateReader,
        expectations: &'a Expectations,
    ) -> Self {
        Self {
            dns,
            certificates,
            expectations,
        }
    }

    /// Runs every delegation check and records outcomes in `report`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Setup`] when a required output is absent or
    /// malformed, and [`VerifyError::Api`] when a live lookup fails.
    pub fn verify(
        &self,
        ctx: &VerificationContext,
        outputs: &ComponentOutputs,
        report: &mut VerificationReport,
    ) -> Result<(), VerifyError> {
        let domain = ctx.delegated_domain();
        let fqdn = domain.to_fqdn();
        tracing::info!(domain = domain.as_str(), "verifying delegated zone outputs");

        let default_domain = outputs.string(output_keys::DEFAULT_DOMAIN_NAME)?;
        report.record_eq(CheckId::DefaultDomainName, domain.as_str(), default_domain.as_str());

        let zones: BTreeMap<String, Zone> = outputs.decode_or_default(output_keys::ZONES)?;
        let zone = zones.get(ctx.label.as_str());
        let default_zone_id = outputs.string(output_keys::DEFAULT_DNS_ZONE_ID)?;
        report.record(
            CheckId::DefaultDnsZoneId,
            zone.is_some_and(|zone| zone.hosted_zone_id() == default_zone_id),
            zone.map_or(MISSING, Zone::hosted_zone_id),
            default_zone_id.as_str(),
            zone.is_none().then(|| format!("zones output has no entry for {}", ctx.label)),
        );

        let protections = outputs.get(output_keys::ROUTE53_HOSTED_ZONE_PROTECTIONS);
        report.record(
            CheckId::HostedZoneProtectionsEmpty,
            protections.is_none_or(is_empty_value),
            "empty",
            protections.map_or_else(|| "absent".to_string(), Value::to_string),
            None,
        );

        tracing::info!(domain = domain.as_str(), "verifying live name server delegation");
        let child = match zone {
            Some(zone) => {
                self.dns.record_set(&ZoneId::new(zone.hosted_zone_id()), &domain, RecordType::Ns)?
            }
            None => None,
        };
        record_ns(
            report,
            (CheckId::ChildNsRecordName, CheckId::ChildNsRecordTtl),
            child.as_ref(),
            &fqdn,
            self.expectations.child_ns_ttl,
        );

        let parent = self.dns.record_set(&ctx.primary_zone.id, &domain, RecordType::Ns)?;
        record_ns(
            report,
            (CheckId::ParentNsRecordName, CheckId::ParentNsRecordTtl),
            parent.as_ref(),
            &fqdn,
            self.expectations.parent_ns_ttl,
        );

        match (&child, &parent) {
            (Some(child), Some(parent)) => {
                let comparison = compare_name_servers(&child.values, &parent.values);
                report.record(
                    CheckId::NsRecordCount,
                    comparison.same_length,
                    parent.values.len().to_string(),
                    child.values.len().to_string(),
                    None,
                );
                report.record(
                    CheckId::NsRecordValues,
                    comparison.matches,
                    comparison.parent.join(", "),
                    comparison.child.join(", "),
                    None,
                );
            }
            _ => {
                let detail = Some("child or parent NS record set is absent".to_string());
                report.record(CheckId::NsRecordCount, false, "equal counts", MISSING, detail.clone());
                report.record(CheckId::NsRecordValues, false, "equal values", MISSING, detail);
            }
        }

        tracing::info!(domain = domain.as_str(), "verifying certificate wiring");
        let parameters: BTreeMap<String, SsmParameter> =
            outputs.decode_or_default(output_keys::ACM_SSM_PARAMETER)?;
        let parameter = parameters.get(ctx.label.as_str());
        let ssm_path = ssm_parameter_path(&self.expectations.ssm_path_prefix, &domain);
        let missing_parameter =
            || Some(format!("acm_ssm_parameter output has no entry for {}", ctx.label));
        match parameter {
            Some(parameter) => {
                report.record_eq(CheckId::SsmParameterId, ssm_path.as_str(), parameter.id.as_str());
                report.record_eq(
                    CheckId::SsmParameterName,
                    ssm_path.as_str(),
                    parameter.name.as_str(),
                );
            }
            None => {
                report.record(CheckId::SsmParameterId, false, &ssm_path, MISSING, missing_parameter());
                report.record(CheckId::SsmParameterName, false, &ssm_path, MISSING, missing_parameter());
            }
        }

        let certificates: BTreeMap<String, Certificate> =
            outputs.decode_or_default(output_keys::CERTIFICATE)?;
        let certificate = certificates.get(ctx.label.as_str());
        let certificate_arn = certificate.map_or(MISSING, |certificate| certificate.arn.as_str());
        let ssm_value = parameter.map(|parameter| parameter.value.as_str());
        report.record(
            CheckId::SsmValueMatchesCertificate,
            certificate.is_some() && ssm_value == Some(certificate_arn),
            certificate_arn,
            ssm_value.unwrap_or(MISSING),
            None,
        );

        self.record_live_certificate(report, ssm_value.filter(|arn| !arn.is_empty()))?;

        let zone_name_servers = zone.map(|zone| zone.name_servers.as_slice());
        match (zone_name_servers, &child) {
            (Some(listed), Some(child)) => {
                let comparison = compare_name_servers(listed, &child.values);
                report.record(
                    CheckId::ZoneNameServersMatch,
                    comparison.matches,
                    comparison.parent.join(", "),
                    comparison.child.join(", "),
                    None,
                );
            }
            _ => report.record(CheckId::ZoneNameServersMatch, false, "live NS values", MISSING, None),
        }

        let validation = certificate.and_then(|certificate| {
            certificate.validation_option_for(domain.as_str())
        });
        report.record(
            CheckId::ValidationRecordType,
            validation.is_some_and(|option| option.resource_record_type == VALIDATION_RECORD_TYPE),
            VALIDATION_RECORD_TYPE,
            validation.map_or(MISSING, |option| option.resource_record_type.as_str()),
            None,
        );
        Ok(())
    }

    /// Describes the certificate and records status and type checks.
    fn record_live_certificate(
        &self,
        report: &mut VerificationReport,
        arn: Option<&str>,
    ) -> Result<(), VerifyError> {
        let policy = self.expectations.issuance;
        let Some(arn) = arn else {
            let detail = Some("no certificate ARN published in the SSM parameter".to_string());
            report.record(
                CheckId::CertificateStatus,
                false,
                policy.expected_label(),
                MISSING,
                detail.clone(),
            );
            report.record(
                CheckId::CertificateType,
                false,
                CertificateType::AmazonIssued.as_str(),
                MISSING,
                detail,
            );
            return Ok(());
        };
        let description = self.certificates.describe_certificate(arn)?;
        let relaxed = (policy == IssuancePolicy::AllowPendingValidation)
            .then(|| "primary zone is not authoritative; pending validation accepted".to_string());
        report.record(
            CheckId::CertificateStatus,
            description.status.as_ref().is_some_and(|status| policy.accepts(status)),
            policy.expected_label(),
            description.status.as_ref().map_or(MISSING, |status| status.as_str()),
            relaxed,
        );
        report.record(
            CheckId::CertificateType,
            description.certificate_type == Some(CertificateType::AmazonIssued),
            CertificateType::AmazonIssued.as_str(),
            description.certificate_type.as_ref().map_or(MISSING, |kind| kind.as_str()),
            None,
        );
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Records name and TTL checks for one NS record set.
fn record_ns(
    report: &mut VerificationReport,
    (name_check, ttl_check): (CheckId, CheckId),
    record: Option<&RecordSet>,
    fqdn: &str,
    expected_ttl: i64,
) {
    let Some(record) = record else {
        let detail = Some(format!("no NS record set found for {fqdn}"));
        report.record(name_check, false, fqdn, MISSING, detail.clone());
        report.record(ttl_check, false, expected_ttl.to_string(), MISSING, detail);
        return;
    };
    report.record(
        name_check,
        fully_qualified(&record.name).eq_ignore_ascii_case(fqdn),
        fqdn,
        record.name.as_str(),
        None,
    );
    report.record(
        ttl_check,
        record.ttl == Some(expected_ttl),
        expected_ttl.to_string(),
        record.ttl.map_or_else(|| MISSING.to_string(), |ttl| ttl.to_string()),
        None,
    );
}
