// crates/dns-delegated-core/src/core/naming.rs
// ============================================================================
// Module: Delegation Naming
// Description: Derivation of delegated names and SSM parameter paths.
// Purpose: Compute the values outputs and live records must agree with.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! All expected names derive from the primary domain and the subdomain label;
//! nothing here touches the network.

use crate::core::identifiers::DomainName;
use crate::core::identifiers::SubdomainLabel;

/// Returns `{label}.{primary}`.
#[must_use]
pub fn delegated_domain_name(label: &SubdomainLabel, primary: &DomainName) -> DomainName {
    primary.child(label)
}

/// Returns the name with exactly one trailing dot.
#[must_use]
pub fn fully_qualified(name: &str) -> String {
    let trimmed = name.trim_end_matches('.');
    format!("{trimmed}.")
}

/// Returns the SSM parameter path for a delegated domain.
///
/// The prefix is joined with exactly one `/` separator.
#[must_use]
pub fn ssm_parameter_path(prefix: &str, domain: &DomainName) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{domain}")
}
