// crates/dns-delegated-core/src/runtime/mod.rs
// ============================================================================
// Module: DNS Delegated Runtime
// Description: Verification routine, scenario runner, and reports.
// Purpose: Compare component outputs with live state and manage teardown.
// Dependencies: crate::{core, interfaces}, tracing, time
// ============================================================================

//! ## Overview
//! The runtime records every check as a soft assertion so one run surfaces
//! all discrepancies. Only setup failures and unexpected API errors stop a
//! scenario, and teardown is attempted on every exit path.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod nameservers;
pub mod report;
pub mod scenario;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use nameservers::NameServerComparison;
pub use nameservers::compare_name_servers;
pub use nameservers::normalize_name_server;
pub use nameservers::sort_case_insensitive;
pub use report::CheckId;
pub use report::CheckOutcome;
pub use report::CheckStatus;
pub use report::ErrorKind;
pub use report::ScenarioError;
pub use report::ScenarioKind;
pub use report::ScenarioReport;
pub use report::TeardownStatus;
pub use report::VerificationReport;
pub use scenario::ScenarioRunner;
pub use scenario::ScenarioSettings;
pub use verifier::DelegationVerifier;
pub use verifier::VerificationContext;
pub use verifier::VerifyError;
