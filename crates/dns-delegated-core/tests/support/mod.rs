// crates/dns-delegated-core/tests/support/mod.rs
// ============================================================================
// Module: Core Test Support
// Description: In-memory harness and cloud readers for verifier tests.
// Purpose: Exercise verification and teardown without AWS or Atmos.
// ============================================================================

//! ## Overview
//! Fakes record every harness call so tests can assert teardown ordering.
//! The fixture mirrors a healthy `abc123` delegation under
//! `components.cptest.test-automation.app`.

#![allow(dead_code, reason = "Each test binary uses a subset of the shared fakes.")]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only fakes panic on misuse."
)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use dns_delegated_core::CertificateDescription;
use dns_delegated_core::CertificateReader;
use dns_delegated_core::CertificateStatus;
use dns_delegated_core::CertificateType;
use dns_delegated_core::CloudError;
use dns_delegated_core::ComponentInputs;
use dns_delegated_core::ComponentName;
use dns_delegated_core::ComponentOutputs;
use dns_delegated_core::ComponentTarget;
use dns_delegated_core::DeploymentHarness;
use dns_delegated_core::DnsRecordReader;
use dns_delegated_core::DomainName;
use dns_delegated_core::Expectations;
use dns_delegated_core::HarnessError;
use dns_delegated_core::HostedZoneRef;
use dns_delegated_core::LabelGenerator;
use dns_delegated_core::RecordSet;
use dns_delegated_core::RecordType;
use dns_delegated_core::StackName;
use dns_delegated_core::SubdomainLabel;
use dns_delegated_core::ZoneId;
use dns_delegated_core::runtime::ScenarioSettings;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixture Constants
// ============================================================================

pub const PRIMARY: &str = "components.cptest.test-automation.app";
pub const LABEL: &str = "abc123";
pub const DELEGATED: &str = "abc123.components.cptest.test-automation.app";
pub const PRIMARY_ZONE_ID: &str = "Z0PRIMARY";
pub const CHILD_ZONE_ID: &str = "Z0CHILD";
pub const CERT_ARN: &str = "arn:aws:acm:us-east-2:123456789012:certificate/0000-abc123";

pub fn primary() -> DomainName {
    DomainName::parse(PRIMARY).unwrap()
}

pub fn label() -> SubdomainLabel {
    SubdomainLabel::parse(LABEL).unwrap()
}

pub fn primary_zone() -> HostedZoneRef {
    HostedZoneRef {
        id: ZoneId::new(PRIMARY_ZONE_ID),
        name: format!("{PRIMARY}."),
    }
}

pub fn child_name_servers() -> Vec<String> {
    vec!["ns-1.awsdns-01.org.".to_string(), "NS-2.awsdns-02.com.".to_string()]
}

pub fn parent_name_servers() -> Vec<String> {
    vec!["ns-2.awsdns-02.com".to_string(), "ns-1.awsdns-01.org".to_string()]
}

/// Outputs of a healthy deployment.
pub fn healthy_outputs_json() -> Value {
    json!({
        "default_domain_name": DELEGATED,
        "default_dns_zone_id": CHILD_ZONE_ID,
        "zones": {
            LABEL: {
                "id": CHILD_ZONE_ID,
                "zone_id": CHILD_ZONE_ID,
                "name": DELEGATED,
                "name_servers": ["ns-1.awsdns-01.org", "ns-2.awsdns-02.com"],
                "force_destroy": true,
                "tags": {"Name": DELEGATED},
                "vpc": []
            }
        },
        "route53_hosted_zone_protections": {},
        "acm_ssm_parameter": {
            LABEL: {
                "id": format!("/acm/{DELEGATED}"),
                "name": format!("/acm/{DELEGATED}"),
                "value": CERT_ARN,
                "type": "String",
                "insecure_value": null,
                "version": 1
            }
        },
        "certificate": {
            LABEL: {
                "arn": CERT_ARN,
                "id": CERT_ARN,
                "domain_validation_options": [[{
                    "domain_name": DELEGATED,
                    "resource_record_name": format!("_x1.{DELEGATED}."),
                    "resource_record_type": "CNAME",
                    "resource_record_value": "_y1.acm-validations.aws."
                }]]
            }
        }
    })
}

pub fn outputs_from(value: Value) -> ComponentOutputs {
    serde_json::from_value(value).unwrap()
}

pub fn healthy_outputs() -> ComponentOutputs {
    outputs_from(healthy_outputs_json())
}

// ============================================================================
// SECTION: DNS Fake
// ============================================================================

/// In-memory Route53.
#[derive(Default)]
pub struct FakeDns {
    pub zones: BTreeMap<String, HostedZoneRef>,
    pub records: BTreeMap<(String, String), RecordSet>,
    pub fail_records: bool,
}

impl FakeDns {
    /// Route53 state matching [`healthy_outputs`].
    pub fn healthy() -> Self {
        let mut dns = Self::default();
        dns.zones.insert(PRIMARY.to_string(), primary_zone());
        dns.insert_record(CHILD_ZONE_ID, 172_800, child_name_servers());
        dns.insert_record(PRIMARY_ZONE_ID, 30, parent_name_servers());
        dns
    }

    pub fn insert_record(&mut self, zone: &str, ttl: i64, values: Vec<String>) {
        self.records.insert(
            (zone.to_string(), DELEGATED.to_string()),
            RecordSet {
                name: format!("{DELEGATED}."),
                record_type: RecordType::Ns,
                ttl: Some(ttl),
                values,
            },
        );
    }

    /// Overrides the name Route53 reports for the delegated record in `zone`.
    pub fn rename_record(&mut self, zone: &str, name: &str) {
        if let Some(record) = self.records.get_mut(&(zone.to_string(), DELEGATED.to_string())) {
            record.name = name.to_string();
        }
    }
}

impl DnsRecordReader for FakeDns {
    fn hosted_zone_by_name(&self, name: &DomainName) -> Result<HostedZoneRef, CloudError> {
        self.zones
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| CloudError::NotFound(format!("hosted zone {name}")))
    }

    fn record_set(
        &self,
        zone: &ZoneId,
        name: &DomainName,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, CloudError> {
        if self.fail_records {
            return Err(CloudError::Api {
                operation: "ListResourceRecordSets",
                message: "throttled".to_string(),
            });
        }
        Ok(self
            .records
            .get(&(zone.as_str().to_string(), name.as_str().to_string()))
            .filter(|record| record.record_type == record_type)
            .cloned())
    }
}

// ============================================================================
// SECTION: ACM Fake
// ============================================================================

/// In-memory ACM.
#[derive(Default)]
pub struct FakeCertificates {
    pub descriptions: BTreeMap<String, CertificateDescription>,
    pub fail: bool,
}

impl FakeCertificates {
    pub fn with_status(status: CertificateStatus) -> Self {
        let mut certificates = Self::default();
        certificates.descriptions.insert(
            CERT_ARN.to_string(),
            CertificateDescription {
                arn: CERT_ARN.to_string(),
                domain_name: Some(DELEGATED.to_string()),
                status: Some(status),
                certificate_type: Some(CertificateType::AmazonIssued),
            },
        );
        certificates
    }

    pub fn issued() -> Self {
        Self::with_status(CertificateStatus::Issued)
    }
}

impl CertificateReader for FakeCertificates {
    fn describe_certificate(&self, arn: &str) -> Result<CertificateDescription, CloudError> {
        if self.fail {
            return Err(CloudError::Api {
                operation: "DescribeCertificate",
                message: "access denied".to_string(),
            });
        }
        self.descriptions
            .get(arn)
            .cloned()
            .ok_or_else(|| CloudError::NotFound(format!("certificate {arn}")))
    }
}

// ============================================================================
// SECTION: Harness Fake
// ============================================================================

/// Deployment harness that records calls.
#[derive(Default)]
pub struct FakeHarness {
    pub outputs: ComponentOutputs,
    pub fail_deploy: bool,
    pub fail_outputs: bool,
    pub fail_destroy: bool,
    pub panic_on_outputs: bool,
    pub plan_changes: bool,
    pub calls: Mutex<Vec<String>>,
    pub deployed_inputs: Mutex<Vec<ComponentInputs>>,
}

impl FakeHarness {
    pub fn with_outputs(outputs: ComponentOutputs) -> Self {
        Self {
            outputs,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: &str, target: &ComponentTarget) {
        self.calls.lock().unwrap().push(format!("{call} {target}"));
    }
}

impl DeploymentHarness for FakeHarness {
    fn deploy(
        &self,
        target: &ComponentTarget,
        inputs: &ComponentInputs,
    ) -> Result<(), HarnessError> {
        self.log("deploy", target);
        self.deployed_inputs.lock().unwrap().push(inputs.clone());
        if self.fail_deploy {
            return Err(HarnessError::CommandFailed {
                command: format!("atmos terraform deploy {target}"),
                status: "exit status: 1".to_string(),
                stderr: "Error: creating Route53 zone".to_string(),
            });
        }
        Ok(())
    }

    fn destroy(
        &self,
        target: &ComponentTarget,
        _inputs: &ComponentInputs,
    ) -> Result<(), HarnessError> {
        self.log("destroy", target);
        if self.fail_destroy {
            return Err(HarnessError::CommandFailed {
                command: format!("atmos terraform destroy {target}"),
                status: "exit status: 1".to_string(),
                stderr: "Error: zone not empty".to_string(),
            });
        }
        Ok(())
    }

    fn outputs(&self, target: &ComponentTarget) -> Result<ComponentOutputs, HarnessError> {
        self.log("outputs", target);
        assert!(!self.panic_on_outputs, "harness exploded");
        if self.fail_outputs {
            return Err(HarnessError::Output("state file missing".to_string()));
        }
        Ok(self.outputs.clone())
    }

    fn plan_has_changes(
        &self,
        target: &ComponentTarget,
        _inputs: &ComponentInputs,
    ) -> Result<bool, HarnessError> {
        self.log("plan", target);
        Ok(self.plan_changes)
    }
}

// ============================================================================
// SECTION: Labels and Settings
// ============================================================================

/// Label generator that always returns the fixture label.
pub struct FixedLabel;

impl LabelGenerator for FixedLabel {
    fn unique_label(&self) -> SubdomainLabel {
        label()
    }
}

pub fn settings() -> ScenarioSettings {
    ScenarioSettings {
        primary_domain: primary(),
        stack: StackName::parse("default-test").unwrap(),
        delegated_component: ComponentName::parse("dns-delegated/basic").unwrap(),
        disabled_component: ComponentName::parse("dns-delegated/disabled").unwrap(),
        expectations: Expectations::default(),
        drift_check: true,
        label: None,
    }
}
