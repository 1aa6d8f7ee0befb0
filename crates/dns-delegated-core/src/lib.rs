// crates/dns-delegated-core/src/lib.rs
// ============================================================================
// Module: DNS Delegated Core Library
// Description: Public API surface for delegated-zone verification.
// Purpose: Expose output records, capability interfaces, and the verifier.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! `dns-delegated-core` verifies that a deployed "dns-delegated" component
//! produced a correctly delegated child zone, a DNS-validated ACM certificate,
//! and an SSM parameter publishing that certificate ARN. Deployment and cloud
//! reads are injected through [`interfaces`] so the comparison logic runs
//! identically against live AWS and in-memory fakes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CertificateReader;
pub use interfaces::CloudError;
pub use interfaces::DeploymentHarness;
pub use interfaces::DnsRecordReader;
pub use interfaces::HarnessError;
pub use interfaces::LabelGenerator;
pub use runtime::CheckId;
pub use runtime::CheckOutcome;
pub use runtime::CheckStatus;
pub use runtime::DelegationVerifier;
pub use runtime::ScenarioKind;
pub use runtime::ScenarioReport;
pub use runtime::ScenarioRunner;
pub use runtime::TeardownStatus;
pub use runtime::VerificationContext;
pub use runtime::VerificationReport;
pub use runtime::VerifyError;
