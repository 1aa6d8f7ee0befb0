// system-tests/tests/delegation.rs
// ============================================================================
// Module: Delegation Suite
// Description: Aggregates live delegation system tests into one binary.
// Purpose: Run both component scenarios against real Atmos and AWS.
// Dependencies: suites/*, helpers
// ============================================================================

//! ## Overview
//! Aggregates live delegation system tests into one binary.
//! Invariants:
//! - Every scenario destroys what it deployed, pass or fail.
//! - Each run uses a fresh random subdomain unless a label is pinned.

mod helpers;

#[path = "suites/delegation_basic.rs"]
mod delegation_basic;
#[path = "suites/enabled_flag.rs"]
mod enabled_flag;
