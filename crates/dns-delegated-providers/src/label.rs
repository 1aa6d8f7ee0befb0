// crates/dns-delegated-providers/src/label.rs
// ============================================================================
// Module: Random Subdomain Labels
// Description: OS-random base-36 labels for per-run delegated zones.
// Purpose: Keep concurrent and repeated runs from colliding on zone names.
// Dependencies: dns-delegated-core, rand
// ============================================================================

//! ## Overview
//! Labels are six lowercase base-36 characters drawn from the OS random
//! source, giving roughly two billion distinct values per width.

use dns_delegated_core::LabelGenerator;
use dns_delegated_core::SubdomainLabel;
use rand::RngCore;
use rand::rngs::OsRng;

/// Default number of characters in a generated label.
pub const DEFAULT_LABEL_WIDTH: usize = 6;

/// Generates random lowercase subdomain labels.
#[derive(Debug, Clone, Copy)]
pub struct RandomLabelGenerator {
    /// Label width in characters.
    width: usize,
}

impl RandomLabelGenerator {
    /// Creates a generator producing labels of `width` characters.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self {
            width,
        }
    }
}

impl Default for RandomLabelGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_WIDTH)
    }
}

impl LabelGenerator for RandomLabelGenerator {
    fn unique_label(&self) -> SubdomainLabel {
        SubdomainLabel::from_base36(OsRng.next_u64(), self.width)
    }
}
