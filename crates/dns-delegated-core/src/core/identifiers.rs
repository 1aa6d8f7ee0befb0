// crates/dns-delegated-core/src/core/identifiers.rs
// ============================================================================
// Module: DNS Delegated Identifiers
// Description: Validated names for domains, labels, zones, and components.
// Purpose: Provide strongly typed identifiers with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Domain names and subdomain labels are validated at construction and stored
//! in canonical form: lowercase, no trailing dot. Zone identifiers drop the
//! `/hostedzone/` prefix Route53 sometimes returns so ids from Terraform
//! outputs and from the live API compare equal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum length of a single DNS label in bytes.
const MAX_LABEL_LENGTH: usize = 63;
/// Maximum length of a full domain name in bytes (without trailing dot).
const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length accepted for component, stack, and region names.
const MAX_NAME_LENGTH: usize = 255;
/// Digits used by [`SubdomainLabel::from_base36`].
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Prefix Route53 attaches to hosted zone ids in some API responses.
const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Value was empty after trimming.
    #[error("{kind} must be non-empty")]
    Empty {
        /// Identifier kind label.
        kind: &'static str,
    },
    /// Value exceeded its length limit.
    #[error("{kind} exceeds max length {max}")]
    TooLong {
        /// Identifier kind label.
        kind: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// Value contained a disallowed character or shape.
    #[error("invalid {kind}: {reason}")]
    Invalid {
        /// Identifier kind label.
        kind: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Domain Names
// ============================================================================

/// Fully qualified domain name in canonical form.
///
/// # Invariants
/// - Lowercase ASCII, no trailing dot, at most 253 bytes.
/// - Every label is 1..=63 bytes of `[a-z0-9-]` and does not start or end with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Parses and canonicalizes a domain name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the name is empty, too long, or has an
    /// invalid label.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty {
                kind: "domain name",
            });
        }
        if trimmed.len() > MAX_DOMAIN_LENGTH {
            return Err(IdentifierError::TooLong {
                kind: "domain name",
                max: MAX_DOMAIN_LENGTH,
            });
        }
        let canonical = trimmed.to_ascii_lowercase();
        for label in canonical.split('.') {
            validate_label("domain name", label)?;
        }
        Ok(Self(canonical))
    }

    /// Returns the canonical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with a trailing dot, as Route53 reports record names.
    #[must_use]
    pub fn to_fqdn(&self) -> String {
        format!("{}.", self.0)
    }

    /// Returns a child domain formed by prefixing `label`.
    #[must_use]
    pub fn child(&self, label: &SubdomainLabel) -> Self {
        Self(format!("{}.{}", label.as_str(), self.0))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DomainName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Subdomain Labels
// ============================================================================

/// Single lowercase DNS label used as the delegated subdomain.
///
/// # Invariants
/// - 1..=63 bytes of `[a-z0-9-]`, no leading or trailing `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubdomainLabel(String);

impl SubdomainLabel {
    /// Parses a subdomain label, lowercasing it first.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the label is not a single valid DNS label.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let canonical = raw.trim().to_ascii_lowercase();
        if canonical.contains('.') {
            return Err(IdentifierError::Invalid {
                kind: "subdomain label",
                reason: "must be a single label without dots".to_string(),
            });
        }
        validate_label("subdomain label", &canonical)?;
        Ok(Self(canonical))
    }

    /// Encodes `value` as a lowercase base-36 label, left-padded with `0` to
    /// `width` digits. Width is capped at the DNS label limit, keeping the
    /// low-order digits.
    #[must_use]
    pub fn from_base36(value: u64, width: usize) -> Self {
        let width = width.clamp(1, MAX_LABEL_LENGTH);
        let mut digits = Vec::with_capacity(width);
        let mut rest = value;
        while digits.len() < width {
            let index = usize::try_from(rest % 36).unwrap_or_default();
            digits.push(char::from(BASE36_DIGITS[index]));
            rest /= 36;
        }
        Self(digits.into_iter().rev().collect())
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubdomainLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SubdomainLabel {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubdomainLabel> for String {
    fn from(value: SubdomainLabel) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Zone Identifiers
// ============================================================================

/// Route53 hosted zone identifier without the `/hostedzone/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a zone id, stripping any `/hostedzone/` prefix.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let stripped = trimmed.strip_prefix(HOSTED_ZONE_PREFIX).unwrap_or(trimmed);
        Self(stripped.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ZoneId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ZoneId> for String {
    fn from(value: ZoneId) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Deployment Names
// ============================================================================

/// Atmos component name (for example `dns-delegated/basic`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

/// Atmos stack name (for example `default-test`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StackName(String);

/// AWS region name (for example `us-east-2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AwsRegion(String);

/// Implements parsing and string conversions for a deployment name newtype.
macro_rules! deployment_name {
    ($name:ident, $kind:literal, $allowed:expr) => {
        impl $name {
            /// Parses and validates the name.
            ///
            /// # Errors
            ///
            /// Returns [`IdentifierError`] when the name is empty, too long, or
            /// contains disallowed characters.
            pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(IdentifierError::Empty {
                        kind: $kind,
                    });
                }
                if trimmed.len() > MAX_NAME_LENGTH {
                    return Err(IdentifierError::TooLong {
                        kind: $kind,
                        max: MAX_NAME_LENGTH,
                    });
                }
                let allowed: fn(char) -> bool = $allowed;
                if let Some(bad) = trimmed.chars().find(|ch| !allowed(*ch)) {
                    return Err(IdentifierError::Invalid {
                        kind: $kind,
                        reason: format!("unexpected character {bad:?}"),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

deployment_name!(ComponentName, "component name", |ch| ch.is_ascii_alphanumeric()
    || matches!(ch, '-' | '_' | '/' | '.'));
deployment_name!(StackName, "stack name", |ch| ch.is_ascii_alphanumeric()
    || matches!(ch, '-' | '_' | '.'));
deployment_name!(AwsRegion, "aws region", |ch| ch.is_ascii_lowercase()
    || ch.is_ascii_digit()
    || ch == '-');

/// Component plus stack pair addressed by the deployment harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTarget {
    /// Atmos component name.
    pub component: ComponentName,
    /// Atmos stack name.
    pub stack: StackName,
}

impl ComponentTarget {
    /// Creates a new component target.
    #[must_use]
    pub const fn new(component: ComponentName, stack: StackName) -> Self {
        Self {
            component,
            stack,
        }
    }
}

impl fmt::Display for ComponentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -s {}", self.component, self.stack)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a single lowercase DNS label.
fn validate_label(kind: &'static str, label: &str) -> Result<(), IdentifierError> {
    if label.is_empty() {
        return Err(IdentifierError::Invalid {
            kind,
            reason: "empty label".to_string(),
        });
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(IdentifierError::TooLong {
            kind,
            max: MAX_LABEL_LENGTH,
        });
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(IdentifierError::Invalid {
            kind,
            reason: format!("label {label:?} must not start or end with '-'"),
        });
    }
    if let Some(bad) =
        label.chars().find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-'))
    {
        return Err(IdentifierError::Invalid {
            kind,
            reason: format!("unexpected character {bad:?}"),
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions favor direct unwrap/expect for clarity."
    )]

    use super::*;

    #[test]
    fn domain_name_is_canonicalized() {
        let name = DomainName::parse(" Components.CPTest.test-automation.app. ").unwrap();
        assert_eq!(name.as_str(), "components.cptest.test-automation.app");
        assert_eq!(name.to_fqdn(), "components.cptest.test-automation.app.");
    }

    #[test]
    fn domain_name_rejects_bad_labels() {
        assert!(DomainName::parse("").is_err());
        assert!(DomainName::parse("a..b").is_err());
        assert!(DomainName::parse("-bad.example").is_err());
        assert!(DomainName::parse("under_score.example").is_err());
        assert!(DomainName::parse(&format!("{}.example", "a".repeat(64))).is_err());
    }

    #[test]
    fn subdomain_label_rejects_dots_and_lowercases() {
        assert_eq!(SubdomainLabel::parse("ABC123").unwrap().as_str(), "abc123");
        assert!(SubdomainLabel::parse("a.b").is_err());
        assert!(SubdomainLabel::parse("").is_err());
    }

    #[test]
    fn base36_labels_are_fixed_width_and_valid() {
        assert_eq!(SubdomainLabel::from_base36(0, 6).as_str(), "000000");
        assert_eq!(SubdomainLabel::from_base36(35, 6).as_str(), "00000z");
        assert_eq!(SubdomainLabel::from_base36(36, 2).as_str(), "10");
        let wide = SubdomainLabel::from_base36(u64::MAX, 100);
        assert_eq!(wide.as_str().len(), 63);
        assert!(SubdomainLabel::parse(wide.as_str()).is_ok());
    }

    #[test]
    fn child_domain_prefixes_label() {
        let parent = DomainName::parse("components.cptest.test-automation.app").unwrap();
        let label = SubdomainLabel::parse("abc123").unwrap();
        assert_eq!(parent.child(&label).as_str(), "abc123.components.cptest.test-automation.app");
    }

    #[test]
    fn zone_id_strips_hosted_zone_prefix() {
        assert_eq!(ZoneId::new("/hostedzone/Z0123ABC").as_str(), "Z0123ABC");
        assert_eq!(ZoneId::new("Z0123ABC"), ZoneId::new("/hostedzone/Z0123ABC"));
    }

    #[test]
    fn deployment_names_validate_characters() {
        assert!(ComponentName::parse("dns-delegated/basic").is_ok());
        assert!(StackName::parse("default-test").is_ok());
        assert!(StackName::parse("default test").is_err());
        assert!(AwsRegion::parse("us-east-2").is_ok());
        assert!(AwsRegion::parse("US-EAST-2").is_err());
    }

    #[test]
    fn domain_name_deserializes_through_validation() {
        let parsed: DomainName = serde_json::from_str("\"Example.COM\"").unwrap();
        assert_eq!(parsed.as_str(), "example.com");
        assert!(serde_json::from_str::<DomainName>("\"bad_name\"").is_err());
    }
}
