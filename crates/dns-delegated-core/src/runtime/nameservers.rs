// crates/dns-delegated-core/src/runtime/nameservers.rs
// ============================================================================
// Module: Name Server Comparison
// Description: Ordering and normalization for NS record value sets.
// Purpose: Compare child and parent delegation records independent of API order.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Route53 returns record values in no guaranteed order, and the child zone
//! and parent delegation disagree on trailing dots. Both sides are sorted by
//! the same case-insensitive order and compared after stripping trailing dots
//! and case.

use std::cmp::Ordering;

use serde::Serialize;

/// Returns the comparison form of a name server: trimmed, lowercase, no trailing dot.
#[must_use]
pub fn normalize_name_server(value: &str) -> String {
    value.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Sorts values case-insensitively, ignoring trailing dots; exact byte order
/// breaks ties.
pub fn sort_case_insensitive(values: &mut [String]) {
    values.sort_by(|left, right| compare_case_insensitive(left, right));
}

/// Case-insensitive ordering with a deterministic tie-break.
fn compare_case_insensitive(left: &str, right: &str) -> Ordering {
    let folded = left
        .trim_end_matches('.')
        .bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(right.trim_end_matches('.').bytes().map(|byte| byte.to_ascii_lowercase()));
    folded.then_with(|| left.cmp(right))
}

/// Result of comparing two NS value sets.
///
/// # Invariants
/// - `child` and `parent` are sorted by [`sort_case_insensitive`].
/// - `matches` implies `child.len() == parent.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameServerComparison {
    /// Sorted child-zone values as returned by the API.
    pub child: Vec<String>,
    /// Sorted parent-delegation values as returned by the API.
    pub parent: Vec<String>,
    /// True when both sides hold the same number of values.
    pub same_length: bool,
    /// True when every pair matches after normalization.
    pub matches: bool,
}

/// Compares child NS values against the parent delegation values.
#[must_use]
pub fn compare_name_servers(child: &[String], parent: &[String]) -> NameServerComparison {
    let mut child = child.to_vec();
    let mut parent = parent.to_vec();
    sort_case_insensitive(&mut child);
    sort_case_insensitive(&mut parent);
    let same_length = child.len() == parent.len();
    let matches = same_length
        && child
            .iter()
            .zip(parent.iter())
            .all(|(left, right)| normalize_name_server(left) == normalize_name_server(right));
    NameServerComparison {
        child,
        parent,
        same_length,
        matches,
    }
}
