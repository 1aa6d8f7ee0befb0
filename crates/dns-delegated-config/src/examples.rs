// crates/dns-delegated-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and `config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `dns-delegated.toml`. Every value shown is the default,
//! so the example loads to the same settings as an empty file.

/// Returns a canonical example `dns-delegated.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[target]
primary_domain = "components.cptest.test-automation.app"
region = "us-east-2"
stack = "default-test"

[components]
delegated = "dns-delegated/basic"
disabled = "dns-delegated/disabled"

[expectations]
child_ns_ttl = 172800
parent_ns_ttl = 30
ssm_path_prefix = "/acm/"
# Set to false when the primary zone is a mock that cannot complete DNS validation.
primary_zone_authoritative = true

[harness]
atmos_binary = "atmos"
# working_dir = "/path/to/infrastructure"
drift_check = true
# label = "abc123"

[logging]
format = "pretty"
level = "info"
"#,
    )
}
