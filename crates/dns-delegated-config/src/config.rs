// crates/dns-delegated-config/src/config.rs
// ============================================================================
// Module: DNS Delegated Configuration
// Description: Configuration loading and validation for verification runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dns-delegated-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults matching the standard `default-test` stack, so
//! an empty file is valid. Names are parsed into core identifier types during
//! validation; any invalid value fails the whole load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use dns_delegated_core::AwsRegion;
use dns_delegated_core::ComponentName;
use dns_delegated_core::DEFAULT_CHILD_NS_TTL;
use dns_delegated_core::DEFAULT_PARENT_NS_TTL;
use dns_delegated_core::DEFAULT_SSM_PATH_PREFIX;
use dns_delegated_core::DomainName;
use dns_delegated_core::Expectations;
use dns_delegated_core::IdentifierError;
use dns_delegated_core::IssuancePolicy;
use dns_delegated_core::StackName;
use dns_delegated_core::SubdomainLabel;
use dns_delegated_core::runtime::ScenarioSettings;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dns-delegated.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DNS_DELEGATED_CONFIG";
/// Maximum size of a config file in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest TTL Route53 accepts.
pub(crate) const MAX_RECORD_TTL: i64 = 2_147_483_647;
/// Maximum length of a log filter directive.
pub(crate) const MAX_LOG_LEVEL_LENGTH: usize = 512;

/// Default primary domain of the shared test account.
pub const DEFAULT_PRIMARY_DOMAIN: &str = "components.cptest.test-automation.app";
/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-2";
/// Default Atmos stack.
pub const DEFAULT_STACK: &str = "default-test";
/// Default component deployed by the delegation scenario.
pub const DEFAULT_DELEGATED_COMPONENT: &str = "dns-delegated/basic";
/// Default component deployed by the enabled-flag scenario.
pub const DEFAULT_DISABLED_COMPONENT: &str = "dns-delegated/disabled";
/// Default Atmos executable.
pub const DEFAULT_ATMOS_BINARY: &str = "atmos";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Verification run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsDelegatedConfig {
    /// Primary domain, region, and stack.
    #[serde(default)]
    pub target: TargetConfig,
    /// Component names per scenario.
    #[serde(default)]
    pub components: ComponentsConfig,
    /// Expected live values.
    #[serde(default)]
    pub expectations: ExpectationsConfig,
    /// Deployment harness settings.
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Logging output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DnsDelegatedConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml_str(content)?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;
        self.components.validate()?;
        self.expectations.validate()?;
        self.harness.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds scenario runner settings from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a name fails to parse.
    pub fn scenario_settings(&self) -> Result<ScenarioSettings, ConfigError> {
        Ok(ScenarioSettings {
            primary_domain: self.target.primary_domain()?,
            stack: self.target.stack()?,
            delegated_component: parse_field(
                "components.delegated",
                ComponentName::parse(&self.components.delegated),
            )?,
            disabled_component: parse_field(
                "components.disabled",
                ComponentName::parse(&self.components.disabled),
            )?,
            expectations: self.expectations.to_expectations(),
            drift_check: self.harness.drift_check,
            label: self.harness.label()?,
        })
    }
}

/// Primary domain, region, and stack under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Pre-existing primary domain the child zone is delegated from.
    pub primary_domain: String,
    /// AWS region for Route53 and ACM clients.
    pub region: String,
    /// Atmos stack name.
    pub stack: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            primary_domain: DEFAULT_PRIMARY_DOMAIN.to_string(),
            region: DEFAULT_REGION.to_string(),
            stack: DEFAULT_STACK.to_string(),
        }
    }
}

impl TargetConfig {
    /// Validates target names.
    fn validate(&self) -> Result<(), ConfigError> {
        self.primary_domain()?;
        self.region()?;
        self.stack()?;
        Ok(())
    }

    /// Returns the parsed primary domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the domain is malformed.
    pub fn primary_domain(&self) -> Result<DomainName, ConfigError> {
        parse_field("target.primary_domain", DomainName::parse(&self.primary_domain))
    }

    /// Returns the parsed AWS region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the region is malformed.
    pub fn region(&self) -> Result<AwsRegion, ConfigError> {
        parse_field("target.region", AwsRegion::parse(&self.region))
    }

    /// Returns the parsed stack name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the stack name is malformed.
    pub fn stack(&self) -> Result<StackName, ConfigError> {
        parse_field("target.stack", StackName::parse(&self.stack))
    }
}

/// Component names per scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Component deployed by the delegation scenario.
    pub delegated: String,
    /// Component deployed by the enabled-flag scenario.
    pub disabled: String,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            delegated: DEFAULT_DELEGATED_COMPONENT.to_string(),
            disabled: DEFAULT_DISABLED_COMPONENT.to_string(),
        }
    }
}

impl ComponentsConfig {
    /// Validates component names.
    fn validate(&self) -> Result<(), ConfigError> {
        parse_field("components.delegated", ComponentName::parse(&self.delegated))?;
        parse_field("components.disabled", ComponentName::parse(&self.disabled))?;
        Ok(())
    }
}

/// Expected live values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectationsConfig {
    /// TTL of the child zone's own NS record.
    pub child_ns_ttl: i64,
    /// TTL of the delegation NS record in the primary zone.
    pub parent_ns_ttl: i64,
    /// SSM parameter path prefix.
    pub ssm_path_prefix: String,
    /// False when the primary zone is a mock that cannot complete DNS validation.
    pub primary_zone_authoritative: bool,
}

impl Default for ExpectationsConfig {
    fn default() -> Self {
        Self {
            child_ns_ttl: DEFAULT_CHILD_NS_TTL,
            parent_ns_ttl: DEFAULT_PARENT_NS_TTL,
            ssm_path_prefix: DEFAULT_SSM_PATH_PREFIX.to_string(),
            primary_zone_authoritative: true,
        }
    }
}

impl ExpectationsConfig {
    /// Validates TTL ranges and the SSM prefix.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_ttl("expectations.child_ns_ttl", self.child_ns_ttl)?;
        validate_ttl("expectations.parent_ns_ttl", self.parent_ns_ttl)?;
        let prefix = self.ssm_path_prefix.trim();
        if !prefix.starts_with('/') {
            return Err(ConfigError::Invalid(
                "expectations.ssm_path_prefix must start with /".to_string(),
            ));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "expectations.ssm_path_prefix must not contain whitespace".to_string(),
            ));
        }
        if prefix.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(
                "expectations.ssm_path_prefix exceeds max length".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts the section into verifier expectations.
    #[must_use]
    pub fn to_expectations(&self) -> Expectations {
        Expectations {
            child_ns_ttl: self.child_ns_ttl,
            parent_ns_ttl: self.parent_ns_ttl,
            ssm_path_prefix: self.ssm_path_prefix.trim().to_string(),
            issuance: IssuancePolicy::for_primary_zone(self.primary_zone_authoritative),
        }
    }
}

/// Deployment harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Atmos executable name or path.
    pub atmos_binary: String,
    /// Working directory for Atmos commands (the infrastructure repo root).
    pub working_dir: Option<PathBuf>,
    /// Re-plan after verification and fail on pending changes.
    pub drift_check: bool,
    /// Fixed subdomain label instead of a random one.
    pub label: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            atmos_binary: DEFAULT_ATMOS_BINARY.to_string(),
            working_dir: None,
            drift_check: true,
            label: None,
        }
    }
}

impl HarnessConfig {
    /// Validates harness paths and the label override.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("harness.atmos_binary", &self.atmos_binary)?;
        if let Some(dir) = &self.working_dir {
            validate_path_string("harness.working_dir", &dir.to_string_lossy())?;
        }
        self.label()?;
        Ok(())
    }

    /// Returns the parsed label override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the label is malformed.
    pub fn label(&self) -> Result<Option<SubdomainLabel>, ConfigError> {
        self.label
            .as_deref()
            .map(|label| parse_field("harness.label", SubdomainLabel::parse(label)))
            .transpose()
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter directive (for example `info` or `dns_delegated_core=debug`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Validates the filter directive shape.
    fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.trim();
        if level.is_empty() {
            return Err(ConfigError::Invalid("logging.level must be non-empty".to_string()));
        }
        if level.len() > MAX_LOG_LEVEL_LENGTH {
            return Err(ConfigError::Invalid("logging.level exceeds max length".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a record TTL.
fn validate_ttl(field: &str, ttl: i64) -> Result<(), ConfigError> {
    if !(1 ..= MAX_RECORD_TTL).contains(&ttl) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between 1 and {MAX_RECORD_TTL}"
        )));
    }
    Ok(())
}

/// Maps an identifier parse error onto a field-qualified config error.
fn parse_field<T>(field: &str, result: Result<T, IdentifierError>) -> Result<T, ConfigError> {
    result.map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))
}
