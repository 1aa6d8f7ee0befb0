// crates/dns-delegated-core/tests/proptest_naming.rs
// ============================================================================
// Module: Naming Property-Based Tests
// Description: Property tests for delegated names and name server comparison.
// Purpose: Detect ordering or normalization regressions across wide inputs.
// ============================================================================

//! Property-based tests for naming and name server invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use dns_delegated_core::DomainName;
use dns_delegated_core::SubdomainLabel;
use dns_delegated_core::delegated_domain_name;
use dns_delegated_core::fully_qualified;
use dns_delegated_core::runtime::compare_name_servers;
use dns_delegated_core::runtime::normalize_name_server;
use dns_delegated_core::ssm_parameter_path;
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,12}"
}

fn primary_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9]{0,10}", 1 .. 4).prop_map(|labels| labels.join("."))
}

fn name_server_strategy() -> impl Strategy<Value = String> {
    "ns-[0-9]{1,4}\\.awsdns-[0-9]{2}\\.(com|net|org|co\\.uk)"
}

fn shuffle_case(value: &str, mask: u64) -> String {
    value
        .chars()
        .enumerate()
        .map(|(index, ch)| if (mask >> (index % 64)) & 1 == 1 { ch.to_ascii_uppercase() } else { ch })
        .collect()
}

proptest! {
    #[test]
    fn delegated_name_is_label_dot_primary(label in label_strategy(), primary in primary_strategy()) {
        let domain = delegated_domain_name(
            &SubdomainLabel::parse(&label).unwrap(),
            &DomainName::parse(&primary).unwrap(),
        );
        prop_assert_eq!(domain.as_str(), format!("{label}.{primary}"));
        prop_assert_eq!(domain.to_fqdn(), format!("{label}.{primary}."));
        prop_assert_eq!(
            ssm_parameter_path("/acm/", &domain),
            format!("/acm/{label}.{primary}")
        );
    }

    #[test]
    fn fully_qualified_is_idempotent(name in "[a-z.]{0,20}") {
        let once = fully_qualified(&name);
        prop_assert!(once.ends_with('.'));
        prop_assert!(!once.ends_with(".."));
        prop_assert_eq!(fully_qualified(&once), once.clone());
    }

    #[test]
    fn permuted_recased_dotted_sets_match(
        servers in prop::collection::btree_set(name_server_strategy(), 1 .. 6),
        mask in any::<u64>(),
        rotation in 0usize .. 6,
    ) {
        let child: Vec<String> = servers.iter().map(|server| format!("{server}.")).collect();
        let mut parent: Vec<String> =
            servers.iter().map(|server| shuffle_case(server, mask)).collect();
        let len = parent.len();
        parent.rotate_left(rotation % len);
        let comparison = compare_name_servers(&child, &parent);
        prop_assert!(comparison.same_length);
        prop_assert!(comparison.matches);
    }

    #[test]
    fn dropping_a_server_never_matches(
        servers in prop::collection::btree_set(name_server_strategy(), 2 .. 6),
    ) {
        let child: Vec<String> = servers.iter().cloned().collect();
        let parent: Vec<String> = servers.iter().skip(1).cloned().collect();
        let comparison = compare_name_servers(&child, &parent);
        prop_assert!(!comparison.matches);
    }

    #[test]
    fn normalization_is_idempotent(value in "[A-Za-z0-9.-]{0,30}") {
        let once = normalize_name_server(&value);
        prop_assert_eq!(normalize_name_server(&once), once);
    }
}
