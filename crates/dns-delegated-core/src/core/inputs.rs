// crates/dns-delegated-core/src/core/inputs.rs
// ============================================================================
// Module: Component Inputs
// Description: Terraform variables passed to the delegated-zone component.
// Purpose: Build the `zone_config` and `enabled` inputs for a scenario.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Inputs serialize to a Terraform JSON variable file. `enabled` is omitted
//! unless set so stack defaults stay in effect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::DomainName;
use crate::core::identifiers::SubdomainLabel;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One delegated zone request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfigEntry {
    /// Subdomain label to delegate.
    pub subdomain: SubdomainLabel,
    /// Parent zone name.
    pub zone_name: DomainName,
}

/// Variables supplied to the component on deploy, plan, and destroy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInputs {
    /// Zones to delegate.
    pub zone_config: Vec<ZoneConfigEntry>,
    /// Optional component enable flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Additional variables passed through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ComponentInputs {
    /// Builds inputs delegating a single subdomain of `primary`.
    #[must_use]
    pub fn single_zone(subdomain: SubdomainLabel, primary: DomainName) -> Self {
        Self {
            zone_config: vec![ZoneConfigEntry {
                subdomain,
                zone_name: primary,
            }],
            enabled: None,
            extra: BTreeMap::new(),
        }
    }

    /// Returns a copy with the enable flag set.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Serializes the inputs as a Terraform JSON variable file.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_var_file_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwrap.")]

    use serde_json::json;

    use super::*;

    #[test]
    fn var_file_matches_component_variables() {
        let inputs = ComponentInputs::single_zone(
            SubdomainLabel::parse("abc123").unwrap(),
            DomainName::parse("components.cptest.test-automation.app").unwrap(),
        );
        let value: Value = serde_json::from_slice(&inputs.to_var_file_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "zone_config": [
                    { "subdomain": "abc123", "zone_name": "components.cptest.test-automation.app" }
                ]
            })
        );
    }

    #[test]
    fn enabled_flag_is_emitted_when_set() {
        let inputs = ComponentInputs::single_zone(
            SubdomainLabel::parse("abc123").unwrap(),
            DomainName::parse("example.com").unwrap(),
        )
        .with_enabled(false);
        let value: Value = serde_json::from_slice(&inputs.to_var_file_json().unwrap()).unwrap();
        assert_eq!(value["enabled"], json!(false));
    }
}
