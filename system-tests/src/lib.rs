// system-tests/src/lib.rs
// ============================================================================
// Module: DNS Delegated System Tests Library
// Description: Shared configuration for live system test scenarios.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the live system-test
//! binaries in `system-tests/tests`. Those binaries deploy real
//! infrastructure and only build with `--features system-tests`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
