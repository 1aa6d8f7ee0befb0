// crates/dns-delegated-core/src/core/records.rs
// ============================================================================
// Module: Live Cloud Records
// Description: Snapshots of Route53 record sets and ACM certificate details.
// Purpose: Decouple the verifier from AWS SDK response types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Cloud adapters convert SDK responses into these records. Status and type
//! enums keep unrecognized wire values so a report can show them verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ZoneId;

// ============================================================================
// SECTION: Route53
// ============================================================================

/// Hosted zone located by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZoneRef {
    /// Hosted zone id.
    pub id: ZoneId,
    /// Zone name as reported by Route53 (trailing dot included).
    pub name: String,
}

/// DNS record types the verifier queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Name server record.
    Ns,
    /// Canonical name record.
    Cname,
    /// Start of authority record.
    Soa,
}

impl RecordType {
    /// Returns the wire name of the record type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ns => "NS",
            Self::Cname => "CNAME",
            Self::Soa => "SOA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource record set returned by Route53.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Record name, usually with a trailing dot.
    pub name: String,
    /// Record type.
    pub record_type: RecordType,
    /// TTL in seconds; absent for alias records.
    pub ttl: Option<i64>,
    /// Record values in API order.
    pub values: Vec<String>,
}

// ============================================================================
// SECTION: ACM
// ============================================================================

/// ACM certificate status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateStatus {
    /// Certificate issued.
    Issued,
    /// Awaiting DNS validation.
    PendingValidation,
    /// Validation timed out.
    ValidationTimedOut,
    /// Validation or issuance failed.
    Failed,
    /// Certificate expired.
    Expired,
    /// Certificate revoked.
    Revoked,
    /// Certificate inactive.
    Inactive,
    /// Unrecognized status string.
    Other(String),
}

impl CertificateStatus {
    /// Parses the ACM wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "ISSUED" => Self::Issued,
            "PENDING_VALIDATION" => Self::PendingValidation,
            "VALIDATION_TIMED_OUT" => Self::ValidationTimedOut,
            "FAILED" => Self::Failed,
            "EXPIRED" => Self::Expired,
            "REVOKED" => Self::Revoked,
            "INACTIVE" => Self::Inactive,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the ACM wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Issued => "ISSUED",
            Self::PendingValidation => "PENDING_VALIDATION",
            Self::ValidationTimedOut => "VALIDATION_TIMED_OUT",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
            Self::Revoked => "REVOKED",
            Self::Inactive => "INACTIVE",
            Self::Other(value) => value,
        }
    }
}

/// ACM certificate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateType {
    /// Issued by Amazon.
    AmazonIssued,
    /// Imported certificate.
    Imported,
    /// Issued by a private CA.
    Private,
    /// Unrecognized type string.
    Other(String),
}

impl CertificateType {
    /// Parses the ACM wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "AMAZON_ISSUED" => Self::AmazonIssued,
            "IMPORTED" => Self::Imported,
            "PRIVATE" => Self::Private,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the ACM wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AmazonIssued => "AMAZON_ISSUED",
            Self::Imported => "IMPORTED",
            Self::Private => "PRIVATE",
            Self::Other(value) => value,
        }
    }
}

/// Certificate details returned by `DescribeCertificate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDescription {
    /// Certificate ARN.
    pub arn: String,
    /// Primary domain name.
    pub domain_name: Option<String>,
    /// Certificate status.
    pub status: Option<CertificateStatus>,
    /// Certificate type.
    pub certificate_type: Option<CertificateType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_unknown_values() {
        assert_eq!(CertificateStatus::from_wire("ISSUED"), CertificateStatus::Issued);
        let other = CertificateStatus::from_wire("SOMETHING_NEW");
        assert_eq!(other.as_str(), "SOMETHING_NEW");
    }

    #[test]
    fn type_parses_amazon_issued() {
        assert_eq!(CertificateType::from_wire("AMAZON_ISSUED"), CertificateType::AmazonIssued);
        assert_eq!(CertificateType::AmazonIssued.as_str(), "AMAZON_ISSUED");
    }
}
