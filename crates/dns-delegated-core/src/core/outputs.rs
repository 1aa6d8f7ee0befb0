// crates/dns-delegated-core/src/core/outputs.rs
// ============================================================================
// Module: Component Outputs
// Description: Typed views over the delegated-zone component's Terraform outputs.
// Purpose: Parse `terraform output -json` into zones, certificates, and SSM params.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Terraform reports outputs as `{ name: { value, type, sensitive } }`.
//! [`ComponentOutputs`] keeps only the values and offers string and typed
//! access, mirroring the harness `Output` / `OutputStruct` calls. Record
//! fields default when Terraform omits an attribute or reports it as null;
//! unknown fields are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Output Keys
// ============================================================================

/// Output names published by the delegated-zone component.
pub mod output_keys {
    /// Fully qualified name of the first delegated zone.
    pub const DEFAULT_DOMAIN_NAME: &str = "default_domain_name";
    /// Hosted zone id of the first delegated zone.
    pub const DEFAULT_DNS_ZONE_ID: &str = "default_dns_zone_id";
    /// Map of subdomain label to hosted zone.
    pub const ZONES: &str = "zones";
    /// Map of hosted zone deletion protections (empty by default).
    pub const ROUTE53_HOSTED_ZONE_PROTECTIONS: &str = "route53_hosted_zone_protections";
    /// Map of subdomain label to SSM parameter holding the certificate ARN.
    pub const ACM_SSM_PARAMETER: &str = "acm_ssm_parameter";
    /// Map of subdomain label to ACM certificate.
    pub const CERTIFICATE: &str = "certificate";
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Output parsing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// Output document was not valid JSON of the expected shape.
    #[error("invalid terraform output document: {0}")]
    Document(String),
    /// Requested output key is absent.
    #[error("output {0} not found")]
    Missing(String),
    /// Output value could not be decoded into the requested type.
    #[error("output {key} has unexpected shape: {reason}")]
    Decode {
        /// Output key.
        key: String,
        /// Decoder error message.
        reason: String,
    },
}

// ============================================================================
// SECTION: Component Outputs
// ============================================================================

/// Output values of one deployed component, keyed by output name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentOutputs {
    /// Output values keyed by name.
    values: BTreeMap<String, Value>,
}

/// Raw `terraform output -json` entry.
#[derive(Deserialize)]
struct TerraformOutputEntry {
    /// Output value.
    #[serde(default)]
    value: Value,
}

impl ComponentOutputs {
    /// Wraps an already-extracted value map.
    #[must_use]
    pub const fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self {
            values,
        }
    }

    /// Parses a `terraform output -json` document.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Document`] when the document is not a JSON object
    /// of output entries.
    pub fn from_terraform_json(bytes: &[u8]) -> Result<Self, OutputError> {
        let trimmed = bytes.trim_ascii();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let entries: BTreeMap<String, TerraformOutputEntry> =
            serde_json::from_slice(trimmed).map_err(|err| OutputError::Document(err.to_string()))?;
        Ok(Self {
            values: entries.into_iter().map(|(key, entry)| (key, entry.value)).collect(),
        })
    }

    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the output as a string, the way `terraform output -raw` renders it.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Missing`] when the key is absent.
    pub fn string(&self, key: &str) -> Result<String, OutputError> {
        let value = self.values.get(key).ok_or_else(|| OutputError::Missing(key.to_string()))?;
        Ok(match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Decodes the output into a typed structure.
    ///
    /// A null output decodes as the type's JSON `null` form, so map-typed
    /// targets should use `Option` or tolerate null via [`Self::decode_or_default`].
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when the key is absent or the value has the
    /// wrong shape.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, OutputError> {
        let value = self.values.get(key).ok_or_else(|| OutputError::Missing(key.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|err| OutputError::Decode {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }

    /// Decodes the output, treating an absent or null value as `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Decode`] when a present value has the wrong shape.
    pub fn decode_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, OutputError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(_) => self.decode(key),
        }
    }

    /// Returns output names whose values are populated.
    #[must_use]
    pub fn populated_keys(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, value)| !is_empty_value(value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Returns all output names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns true when no outputs are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returns true for null, empty strings, empty lists, and empty objects.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Decodes a field, mapping an explicit JSON `null` to the type's default.
///
/// Terraform emits unset optional attributes as `null` rather than omitting
/// them; container-level `#[serde(default)]` only covers the omitted case.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// SECTION: Zone
// ============================================================================

/// VPC association of a private hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneVpc {
    /// VPC identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub vpc_id: String,
    /// VPC region.
    #[serde(deserialize_with = "null_as_default")]
    pub vpc_region: String,
}

/// Route53 hosted zone as reported in the `zones` output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    /// Zone ARN.
    #[serde(deserialize_with = "null_as_default")]
    pub arn: String,
    /// Zone comment.
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    /// Reusable delegation set id, when used.
    #[serde(deserialize_with = "null_as_default")]
    pub delegation_set_id: String,
    /// Whether Terraform deletes records on destroy.
    #[serde(deserialize_with = "null_as_default")]
    pub force_destroy: bool,
    /// Terraform resource id (same as `zone_id`).
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Zone name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Name servers assigned to the zone.
    #[serde(deserialize_with = "null_as_default")]
    pub name_servers: Vec<String>,
    /// Primary name server from the SOA record.
    #[serde(deserialize_with = "null_as_default")]
    pub primary_name_server: String,
    /// Resource tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
    /// Resource tags including provider defaults.
    #[serde(deserialize_with = "null_as_default")]
    pub tags_all: BTreeMap<String, String>,
    /// VPC associations for private zones.
    #[serde(deserialize_with = "null_as_default")]
    pub vpc: Vec<ZoneVpc>,
    /// Route53 hosted zone id.
    #[serde(deserialize_with = "null_as_default")]
    pub zone_id: String,
}

impl Zone {
    /// Returns the hosted zone id, falling back to the resource id.
    #[must_use]
    pub fn hosted_zone_id(&self) -> &str {
        if self.zone_id.is_empty() { &self.id } else { &self.zone_id }
    }
}

// ============================================================================
// SECTION: Certificate
// ============================================================================

/// DNS validation record ACM requires for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainValidationOption {
    /// Domain being validated.
    #[serde(deserialize_with = "null_as_default")]
    pub domain_name: String,
    /// Validation record name.
    #[serde(deserialize_with = "null_as_default")]
    pub resource_record_name: String,
    /// Validation record type (normally `CNAME`).
    #[serde(deserialize_with = "null_as_default")]
    pub resource_record_type: String,
    /// Validation record value.
    #[serde(deserialize_with = "null_as_default")]
    pub resource_record_value: String,
}

/// ACM certificate as reported in the `certificate` output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    /// Certificate ARN.
    #[serde(deserialize_with = "null_as_default")]
    pub arn: String,
    /// DNS validation options, flattened across nesting levels.
    #[serde(deserialize_with = "deserialize_flattened_options")]
    pub domain_validation_options: Vec<DomainValidationOption>,
    /// Terraform resource id.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// ARN of the validated certificate.
    #[serde(deserialize_with = "null_as_default")]
    pub validation_certificate_arn: String,
    /// Validation resource id.
    #[serde(deserialize_with = "null_as_default")]
    pub validation_id: String,
}

impl Certificate {
    /// Returns the validation option for `domain`, compared case-insensitively
    /// and ignoring a trailing dot.
    #[must_use]
    pub fn validation_option_for(&self, domain: &str) -> Option<&DomainValidationOption> {
        let wanted = domain.trim_end_matches('.');
        self.domain_validation_options
            .iter()
            .find(|option| option.domain_name.trim_end_matches('.').eq_ignore_ascii_case(wanted))
    }
}

/// Accepts validation options as a flat list or nested lists.
fn deserialize_flattened_options<'de, D>(
    deserializer: D,
) -> Result<Vec<DomainValidationOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let mut flat = Vec::new();
    collect_options(raw, &mut flat).map_err(serde::de::Error::custom)?;
    Ok(flat)
}

/// Recursively collects option objects from nested arrays.
fn collect_options(value: Value, out: &mut Vec<DomainValidationOption>) -> Result<(), String> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                collect_options(item, out)?;
            }
            Ok(())
        }
        object @ Value::Object(_) => {
            let option = serde_json::from_value(object).map_err(|err| err.to_string())?;
            out.push(option);
            Ok(())
        }
        other => Err(format!("unexpected validation option value: {other}")),
    }
}

// ============================================================================
// SECTION: SSM Parameter
// ============================================================================

/// SSM parameter as reported in the `acm_ssm_parameter` output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SsmParameter {
    /// Regex constraining values.
    #[serde(deserialize_with = "null_as_default")]
    pub allowed_pattern: String,
    /// Parameter data type.
    #[serde(deserialize_with = "null_as_default")]
    pub data_type: String,
    /// Parameter description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Terraform resource id (the parameter path).
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Non-secret value, when set through `insecure_value`.
    pub insecure_value: Value,
    /// KMS key id for `SecureString` parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub key_id: String,
    /// Parameter path.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Whether Terraform overwrites existing values.
    #[serde(deserialize_with = "null_as_default")]
    pub overwrite: bool,
    /// Resource tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, Value>,
    /// Resource tags including provider defaults.
    #[serde(deserialize_with = "null_as_default")]
    pub tags_all: BTreeMap<String, Value>,
    /// Parameter tier.
    #[serde(deserialize_with = "null_as_default")]
    pub tier: String,
    /// Parameter type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub parameter_type: String,
    /// Parameter value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Parameter version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
