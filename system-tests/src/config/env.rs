// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for live system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 or empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional `dns-delegated.toml` path.
    ConfigPath,
    /// Optional run root override for artifacts.
    RunRoot,
    /// Optional fixed subdomain label.
    Label,
    /// Optional drift check override (`true`/`false` or `1`/`0`).
    DriftCheck,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "DNS_DELEGATED_SYSTEM_TEST_CONFIG",
            Self::RunRoot => "DNS_DELEGATED_SYSTEM_TEST_RUN_ROOT",
            Self::Label => "DNS_DELEGATED_SYSTEM_TEST_LABEL",
            Self::DriftCheck => "DNS_DELEGATED_SYSTEM_TEST_DRIFT_CHECK",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional config file path; the default resolution applies when unset.
    pub config_path: Option<PathBuf>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional fixed subdomain label.
    pub label: Option<String>,
    /// Optional drift check override.
    pub drift_check: Option<bool>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid boolean value).
    pub fn load() -> Result<Self, String> {
        let config_path =
            read_env_nonempty(SystemTestEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let label = read_env_nonempty(SystemTestEnv::Label.as_str())?
            .map(|value| value.trim().to_string());
        let drift_check = read_env_nonempty(SystemTestEnv::DriftCheck.as_str())?
            .map(|value| parse_bool(SystemTestEnv::DriftCheck.as_str(), &value))
            .transpose()?;
        Ok(Self {
            config_path,
            run_root,
            label,
            drift_check,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a boolean literal.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
