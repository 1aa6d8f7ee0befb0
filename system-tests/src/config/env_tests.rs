// system-tests/src/config/env_tests.rs
// ============================================================================
// Module: System Test Env Unit Tests
// Description: Unit coverage for strict environment parsing in system-tests.
// Purpose: Ensure configuration parsing fails closed on invalid inputs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Covers `DNS_DELEGATED_SYSTEM_TEST_*` parsing: defaults when unset, trimmed
//! labels, boolean drift overrides, and rejection of empty values.
//! Invariants:
//! - Environment parsing rejects invalid or empty values.
//! - Tests restore environment state after each run.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

use super::SystemTestConfig;
use super::SystemTestEnv;

mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock poisoned")
}

struct EnvGuard {
    entries: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn new(names: &[&'static str]) -> Self {
        let entries = names.iter().map(|name| (*name, std::env::var(*name).ok())).collect();
        Self {
            entries,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => env_mut::set_var(name, &value),
                None => env_mut::remove_var(name),
            }
        }
    }
}

fn env_names() -> [&'static str; 4] {
    [
        SystemTestEnv::ConfigPath.as_str(),
        SystemTestEnv::RunRoot.as_str(),
        SystemTestEnv::Label.as_str(),
        SystemTestEnv::DriftCheck.as_str(),
    ]
}

fn clear_all() {
    for name in env_names() {
        env_mut::remove_var(name);
    }
}

#[test]
fn unset_environment_loads_defaults() {
    let _lock = env_lock();
    let _guard = EnvGuard::new(&env_names());
    clear_all();

    let config = SystemTestConfig::load().expect("config should load");
    assert_eq!(config, SystemTestConfig::default());
}

#[test]
fn paths_and_label_are_read() {
    let _lock = env_lock();
    let _guard = EnvGuard::new(&env_names());
    clear_all();

    env_mut::set_var(SystemTestEnv::ConfigPath.as_str(), "/tmp/dns-delegated.toml");
    env_mut::set_var(SystemTestEnv::Label.as_str(), " run42 ");
    let config = SystemTestConfig::load().expect("config should load");
    assert_eq!(config.config_path, Some(PathBuf::from("/tmp/dns-delegated.toml")));
    assert_eq!(config.label.as_deref(), Some("run42"));
}

#[test]
fn drift_check_parses_bool_values() {
    let _lock = env_lock();
    let _guard = EnvGuard::new(&env_names());
    clear_all();

    env_mut::set_var(SystemTestEnv::DriftCheck.as_str(), "0");
    let config = SystemTestConfig::load().expect("config should load");
    assert_eq!(config.drift_check, Some(false));

    env_mut::set_var(SystemTestEnv::DriftCheck.as_str(), "TRUE");
    let config = SystemTestConfig::load().expect("config should load");
    assert_eq!(config.drift_check, Some(true));
}

#[test]
fn drift_check_rejects_invalid_values() {
    let _lock = env_lock();
    let _guard = EnvGuard::new(&env_names());
    clear_all();

    env_mut::set_var(SystemTestEnv::DriftCheck.as_str(), "maybe");
    assert!(SystemTestConfig::load().is_err());
}

#[test]
fn empty_values_fail_closed() {
    let _lock = env_lock();
    let _guard = EnvGuard::new(&env_names());
    clear_all();

    env_mut::set_var(SystemTestEnv::RunRoot.as_str(), "");
    assert!(SystemTestConfig::load().is_err());
}
