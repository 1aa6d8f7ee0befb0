// crates/dns-delegated-providers/src/lib.rs
// ============================================================================
// Module: DNS Delegated Providers
// Description: Concrete deployment harness, cloud readers, and label generator.
// Purpose: Bind core capability interfaces to Atmos, Route53, and ACM.
// Dependencies: dns-delegated-core, aws-sdk-route53, aws-sdk-acm, rand, tempfile, tokio
// ============================================================================

//! ## Overview
//! This crate implements the core capability interfaces against real
//! systems: [`AtmosHarness`] shells out to `atmos terraform`, [`AwsCloud`]
//! reads Route53 and ACM through the AWS SDK, and [`RandomLabelGenerator`]
//! produces short lowercase subdomain labels.
//! Invariants:
//! - Every call blocks until the underlying command or API call finishes.
//! - Nothing retries; failures surface to the scenario runner unchanged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod atmos;
pub mod aws;
pub mod label;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use atmos::AtmosHarness;
pub use atmos::CommandOutput;
pub use atmos::CommandRunner;
pub use atmos::CommandSpec;
pub use atmos::ProcessRunner;
pub use aws::AwsCloud;
pub use label::RandomLabelGenerator;
