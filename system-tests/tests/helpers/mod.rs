// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for live dns-delegated system-tests.
// Purpose: Provide live environment wiring and artifact utilities.
// Dependencies: system-tests, dns-delegated-{config, core, providers}
// ============================================================================

//! ## Overview
//! Shared helpers for live dns-delegated system-tests.
//! Invariants:
//! - Every deployed component is destroyed by the scenario runner.
//! - Each test writes a summary under its run root, pass or fail.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod live;
