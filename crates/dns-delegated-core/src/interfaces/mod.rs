// crates/dns-delegated-core/src/interfaces/mod.rs
// ============================================================================
// Module: DNS Delegated Interfaces
// Description: Capability interfaces for deployment, DNS reads, and ACM reads.
// Purpose: Define the contract surfaces the verifier and scenario runner use.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces keep the verifier independent of Atmos, Terraform, and the AWS
//! SDK. Every call is synchronous and blocking; implementations own whatever
//! runtime they need. Implementations must not retry on their own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CertificateDescription;
use crate::core::ComponentInputs;
use crate::core::ComponentOutputs;
use crate::core::ComponentTarget;
use crate::core::DomainName;
use crate::core::HostedZoneRef;
use crate::core::RecordSet;
use crate::core::RecordType;
use crate::core::SubdomainLabel;
use crate::core::ZoneId;

// ============================================================================
// SECTION: Deployment Harness
// ============================================================================

/// Deployment harness errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The harness command could not be started.
    #[error("harness spawn failed: {0}")]
    Spawn(String),
    /// The harness command exited unsuccessfully.
    #[error("harness command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error (truncated).
        stderr: String,
    },
    /// Harness input or output could not be processed.
    #[error("harness io error: {0}")]
    Io(String),
    /// Outputs could not be parsed.
    #[error("harness output error: {0}")]
    Output(String),
}

/// Deploys, inspects, and destroys an infrastructure component.
pub trait DeploymentHarness {
    /// Applies the component with the given inputs.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the deployment fails.
    fn deploy(&self, target: &ComponentTarget, inputs: &ComponentInputs)
    -> Result<(), HarnessError>;

    /// Destroys the component deployed with the given inputs.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when teardown fails.
    fn destroy(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<(), HarnessError>;

    /// Reads all outputs of the deployed component.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when outputs cannot be read or parsed.
    fn outputs(&self, target: &ComponentTarget) -> Result<ComponentOutputs, HarnessError>;

    /// Plans the component and reports whether changes are pending.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when planning fails.
    fn plan_has_changes(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<bool, HarnessError>;
}

// ============================================================================
// SECTION: Cloud Readers
// ============================================================================

/// Live cloud read errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Client could not be constructed.
    #[error("cloud client error: {0}")]
    Client(String),
    /// API call failed.
    #[error("cloud api error during {operation}: {message}")]
    Api {
        /// API operation name.
        operation: &'static str,
        /// Error message.
        message: String,
    },
    /// Requested resource does not exist.
    #[error("cloud resource not found: {0}")]
    NotFound(String),
}

/// Reads Route53 hosted zones and record sets.
pub trait DnsRecordReader {
    /// Finds the public hosted zone with exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::NotFound`] when no zone matches, or another
    /// [`CloudError`] when the API call fails.
    fn hosted_zone_by_name(&self, name: &DomainName) -> Result<HostedZoneRef, CloudError>;

    /// Fetches the record set `name`/`record_type` in `zone`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError`] when the API call fails.
    fn record_set(
        &self,
        zone: &ZoneId,
        name: &DomainName,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, CloudError>;
}

/// Reads ACM certificate details.
pub trait CertificateReader {
    /// Describes the certificate with `arn`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError`] when the API call fails.
    fn describe_certificate(&self, arn: &str) -> Result<CertificateDescription, CloudError>;
}

// ============================================================================
// SECTION: Label Generator
// ============================================================================

/// Produces collision-resistant subdomain labels, one per scenario run.
pub trait LabelGenerator {
    /// Returns a fresh lowercase label.
    fn unique_label(&self) -> SubdomainLabel;
}
