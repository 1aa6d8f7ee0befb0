// crates/dns-delegated-config/src/lib.rs
// ============================================================================
// Module: DNS Delegated Config Library
// Description: Canonical config model, validation, and example rendering.
// Purpose: Single source of truth for dns-delegated.toml semantics.
// Dependencies: dns-delegated-core, serde, toml
// ============================================================================

//! ## Overview
//! `dns-delegated-config` defines the configuration model for delegated-zone
//! verification runs. Loading is strict and fail-closed: oversized, non-UTF-8,
//! or semantically invalid files are rejected before any cloud call is made.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
