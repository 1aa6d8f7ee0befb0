// crates/dns-delegated-providers/src/aws.rs
// ============================================================================
// Module: AWS Cloud Readers
// Description: Route53 and ACM readers over the AWS SDK.
// Purpose: Fetch live hosted zones, record sets, and certificate details.
// Dependencies: aws-config, aws-sdk-route53, aws-sdk-acm, tokio
// ============================================================================

//! ## Overview
//! [`AwsCloud`] owns a Tokio runtime and blocks on each SDK call so the
//! verifier can stay synchronous. Credentials come from the default AWS
//! provider chain; the region is always explicit.
//!
//! Record lookups start listing at the requested name and type, then pick the
//! exact match from the first page. Names compare case-insensitively with
//! trailing dots ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_route53::types::RrType;
use dns_delegated_core::AwsRegion;
use dns_delegated_core::CertificateDescription;
use dns_delegated_core::CertificateReader;
use dns_delegated_core::CertificateStatus;
use dns_delegated_core::CertificateType;
use dns_delegated_core::CloudError;
use dns_delegated_core::DnsRecordReader;
use dns_delegated_core::DomainName;
use dns_delegated_core::HostedZoneRef;
use dns_delegated_core::RecordSet;
use dns_delegated_core::RecordType;
use dns_delegated_core::ZoneId;
use tokio::runtime::Runtime;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Live Route53 and ACM reader for one region.
pub struct AwsCloud {
    /// Route53 client handle.
    route53: aws_sdk_route53::Client,
    /// ACM client handle.
    acm: aws_sdk_acm::Client,
    /// Region the clients target.
    region: AwsRegion,
    /// Tokio runtime for blocking SDK calls.
    runtime: Option<Arc<Runtime>>,
}

impl Drop for AwsCloud {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = std::thread::spawn(move || drop(runtime));
        }
    }
}

impl AwsCloud {
    /// Builds clients from the default credential chain for `region`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Client`] when the runtime cannot be created.
    pub fn new(region: &AwsRegion) -> Result<Self, CloudError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| CloudError::Client(err.to_string()))?;
        let shared_config = runtime.block_on(async {
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.as_str().to_string()))
                .load()
                .await
        });
        let route53 =
            aws_sdk_route53::Client::from_conf(aws_sdk_route53::config::Builder::from(&shared_config).build());
        let acm = aws_sdk_acm::Client::from_conf(aws_sdk_acm::config::Builder::from(&shared_config).build());
        tracing::debug!(region = region.as_str(), "aws clients initialized");
        Ok(Self {
            route53,
            acm,
            region: region.clone(),
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Returns the configured region.
    #[must_use]
    pub const fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// Returns the runtime, failing once it has been released.
    fn runtime(&self) -> Result<&Runtime, CloudError> {
        self.runtime
            .as_deref()
            .ok_or_else(|| CloudError::Client("aws runtime unavailable".to_string()))
    }
}

// ============================================================================
// SECTION: Route53
// ============================================================================

impl DnsRecordReader for AwsCloud {
    fn hosted_zone_by_name(&self, name: &DomainName) -> Result<HostedZoneRef, CloudError> {
        let fqdn = name.to_fqdn();
        let output = self
            .runtime()?
            .block_on(async {
                self.route53.list_hosted_zones_by_name().dns_name(&fqdn).send().await
            })
            .map_err(|err| api_error("ListHostedZonesByName", &err))?;
        output
            .hosted_zones()
            .iter()
            .filter(|zone| !zone.config().is_some_and(|config| config.private_zone()))
            .find(|zone| names_match(zone.name(), &fqdn))
            .map(|zone| HostedZoneRef {
                id: ZoneId::new(zone.id()),
                name: zone.name().to_string(),
            })
            .ok_or_else(|| CloudError::NotFound(format!("public hosted zone {fqdn}")))
    }

    fn record_set(
        &self,
        zone: &ZoneId,
        name: &DomainName,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, CloudError> {
        let fqdn = name.to_fqdn();
        let sdk_type = sdk_record_type(record_type);
        let output = self
            .runtime()?
            .block_on(async {
                self.route53
                    .list_resource_record_sets()
                    .hosted_zone_id(zone.as_str())
                    .start_record_name(&fqdn)
                    .start_record_type(sdk_type.clone())
                    .send()
                    .await
            })
            .map_err(|err| api_error("ListResourceRecordSets", &err))?;
        let found = output
            .resource_record_sets()
            .iter()
            .find(|set| set.r#type() == &sdk_type && names_match(set.name(), &fqdn))
            .map(|set| RecordSet {
                name: set.name().to_string(),
                record_type,
                ttl: set.ttl(),
                values: set
                    .resource_records()
                    .iter()
                    .map(|record| record.value().to_string())
                    .collect(),
            });
        if found.is_none() {
            tracing::debug!(zone = zone.as_str(), name = %fqdn, record_type = %record_type, "record set not found");
        }
        Ok(found)
    }
}

// ============================================================================
// SECTION: ACM
// ============================================================================

impl CertificateReader for AwsCloud {
    fn describe_certificate(&self, arn: &str) -> Result<CertificateDescription, CloudError> {
        let result = self.runtime()?.block_on(async {
            self.acm.describe_certificate().certificate_arn(arn).send().await
        });
        let output = match result {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_resource_not_found_exception()) =>
            {
                return Err(CloudError::NotFound(format!("certificate {arn}")));
            }
            Err(err) => return Err(api_error("DescribeCertificate", &err)),
        };
        let detail = output
            .certificate()
            .ok_or_else(|| CloudError::NotFound(format!("certificate {arn}")))?;
        Ok(CertificateDescription {
            arn: detail.certificate_arn().unwrap_or(arn).to_string(),
            domain_name: detail.domain_name().map(str::to_string),
            status: detail.status().map(|status| CertificateStatus::from_wire(status.as_str())),
            certificate_type: detail.r#type().map(|kind| CertificateType::from_wire(kind.as_str())),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a record type onto the SDK enum.
fn sdk_record_type(record_type: RecordType) -> RrType {
    match record_type {
        RecordType::Ns => RrType::Ns,
        RecordType::Cname => RrType::Cname,
        RecordType::Soa => RrType::Soa,
    }
}

/// Compares DNS names case-insensitively, ignoring trailing dots.
pub(crate) fn names_match(left: &str, right: &str) -> bool {
    left.trim_end_matches('.').eq_ignore_ascii_case(right.trim_end_matches('.'))
}

/// Wraps an SDK error with its full source chain.
fn api_error<E>(operation: &'static str, err: &E) -> CloudError
where
    E: std::error::Error,
{
    let message = aws_sdk_route53::error::DisplayErrorContext(err).to_string();
    tracing::warn!(operation, error = %message, "aws call failed");
    CloudError::Api {
        operation,
        message,
    }
}
