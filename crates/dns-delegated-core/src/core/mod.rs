// crates/dns-delegated-core/src/core/mod.rs
// ============================================================================
// Module: DNS Delegated Core Types
// Description: Identifiers, component inputs, output records, and live records.
// Purpose: Group the value types shared by the verifier and its adapters.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Value records are immutable once parsed. Output records mirror the JSON
//! shapes Terraform emits for the component; live records mirror what the
//! Route53 and ACM read APIs return.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod expectations;
pub mod identifiers;
pub mod inputs;
pub mod naming;
pub mod outputs;
pub mod records;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use expectations::DEFAULT_CHILD_NS_TTL;
pub use expectations::DEFAULT_PARENT_NS_TTL;
pub use expectations::DEFAULT_SSM_PATH_PREFIX;
pub use expectations::Expectations;
pub use expectations::IssuancePolicy;
pub use identifiers::AwsRegion;
pub use identifiers::ComponentName;
pub use identifiers::ComponentTarget;
pub use identifiers::DomainName;
pub use identifiers::IdentifierError;
pub use identifiers::StackName;
pub use identifiers::SubdomainLabel;
pub use identifiers::ZoneId;
pub use inputs::ComponentInputs;
pub use inputs::ZoneConfigEntry;
pub use naming::delegated_domain_name;
pub use naming::fully_qualified;
pub use naming::ssm_parameter_path;
pub use outputs::Certificate;
pub use outputs::ComponentOutputs;
pub use outputs::DomainValidationOption;
pub use outputs::OutputError;
pub use outputs::SsmParameter;
pub use outputs::Zone;
pub use outputs::ZoneVpc;
pub use outputs::is_empty_value;
pub use outputs::output_keys;
pub use records::CertificateDescription;
pub use records::CertificateStatus;
pub use records::CertificateType;
pub use records::HostedZoneRef;
pub use records::RecordSet;
pub use records::RecordType;
