// crates/dns-delegated-core/src/core/expectations.rs
// ============================================================================
// Module: Verification Expectations
// Description: Expected TTLs, SSM path prefix, and certificate issuance policy.
// Purpose: Parameterize the verifier without hard-coding deployment constants.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Defaults match the delegated-zone component: the child zone publishes its
//! NS record with a two-day TTL, the parent delegation uses 30 seconds, and
//! the certificate ARN lands under `/acm/<domain>`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::records::CertificateStatus;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// TTL Route53 assigns to the apex NS record of a new hosted zone.
pub const DEFAULT_CHILD_NS_TTL: i64 = 172_800;
/// TTL the component sets on the delegation NS record in the parent zone.
pub const DEFAULT_PARENT_NS_TTL: i64 = 30;
/// SSM path prefix under which certificate ARNs are published.
pub const DEFAULT_SSM_PATH_PREFIX: &str = "/acm/";

// ============================================================================
// SECTION: Issuance Policy
// ============================================================================

/// Accepted ACM certificate statuses.
///
/// # Invariants
/// - `Strict` accepts only `ISSUED`.
/// - `AllowPendingValidation` also accepts `PENDING_VALIDATION`; used when the
///   primary zone is not authoritative on the public internet and DNS
///   validation can never complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuancePolicy {
    /// Certificate must be issued.
    #[default]
    Strict,
    /// Certificate may still be awaiting DNS validation.
    AllowPendingValidation,
}

impl IssuancePolicy {
    /// Selects the policy for a primary zone.
    #[must_use]
    pub const fn for_primary_zone(authoritative: bool) -> Self {
        if authoritative { Self::Strict } else { Self::AllowPendingValidation }
    }

    /// Returns true when `status` satisfies the policy.
    #[must_use]
    pub fn accepts(self, status: &CertificateStatus) -> bool {
        match self {
            Self::Strict => *status == CertificateStatus::Issued,
            Self::AllowPendingValidation => {
                matches!(status, CertificateStatus::Issued | CertificateStatus::PendingValidation)
            }
        }
    }

    /// Returns the accepted statuses as a display string.
    #[must_use]
    pub const fn expected_label(self) -> &'static str {
        match self {
            Self::Strict => "ISSUED",
            Self::AllowPendingValidation => "ISSUED | PENDING_VALIDATION",
        }
    }
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Values the verifier compares live state against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectations {
    /// Expected TTL of the child zone's own NS record.
    pub child_ns_ttl: i64,
    /// Expected TTL of the delegation NS record in the parent zone.
    pub parent_ns_ttl: i64,
    /// Prefix of the SSM parameter path holding the certificate ARN.
    pub ssm_path_prefix: String,
    /// Accepted certificate statuses.
    pub issuance: IssuancePolicy,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            child_ns_ttl: DEFAULT_CHILD_NS_TTL,
            parent_ns_ttl: DEFAULT_PARENT_NS_TTL,
            ssm_path_prefix: DEFAULT_SSM_PATH_PREFIX.to_string(),
            issuance: IssuancePolicy::Strict,
        }
    }
}
