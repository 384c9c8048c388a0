//! Domain identifier types with validation
//!
//! Tenant-scoped identifiers are opaque to this crate: the only rule is that
//! they are non-empty. [`ClaimId`] is the one identifier whose shape is part
//! of the external contract (`CLM-` followed by 8 uppercase alphanumerics).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! tenant_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting blank values
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

tenant_id!(
    /// Practice (tenant) identifier. Also the billing provider on a claim.
    PracticeId,
    "Practice ID"
);

tenant_id!(
    /// Therapist identifier. Rendering provider on a claim.
    TherapistId,
    "Therapist ID"
);

tenant_id!(
    /// Patient identifier, scoped to a practice
    PatientId,
    "Patient ID"
);

/// Prefix shared by every claim identifier
pub const CLAIM_ID_PREFIX: &str = "CLM-";

/// Number of characters following [`CLAIM_ID_PREFIX`]
pub const CLAIM_ID_SUFFIX_LEN: usize = 8;

/// Claim identifier newtype wrapper
///
/// Format: `CLM-XXXXXXXX` where each `X` is an uppercase ASCII letter or digit.
///
/// # Examples
///
/// ```
/// use clara::domain::ids::ClaimId;
///
/// let id = ClaimId::parse("CLM-1A2B3C4D").unwrap();
/// assert_eq!(id.suffix(), "1A2B3C4D");
/// assert!(ClaimId::parse("CLM-1a2b3c4d").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimId(String);

impl ClaimId {
    /// Parses and validates a claim identifier
    pub fn parse(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let suffix = id
            .strip_prefix(CLAIM_ID_PREFIX)
            .ok_or_else(|| format!("Claim ID must start with '{CLAIM_ID_PREFIX}', got: {id}"))?;

        let well_formed = suffix.len() == CLAIM_ID_SUFFIX_LEN
            && suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(format!(
                "Claim ID suffix must be {CLAIM_ID_SUFFIX_LEN} uppercase alphanumeric characters, got: {id}"
            ));
        }

        Ok(Self(id))
    }

    /// Builds a claim identifier from an 8-character suffix
    pub fn from_suffix(suffix: &str) -> Result<Self, String> {
        Self::parse(format!("{CLAIM_ID_PREFIX}{suffix}"))
    }

    /// Generator-side constructor; the caller guarantees the suffix shape
    pub(crate) fn from_trusted_suffix(suffix: &str) -> Self {
        debug_assert_eq!(suffix.len(), CLAIM_ID_SUFFIX_LEN);
        Self(format!("{CLAIM_ID_PREFIX}{suffix}"))
    }

    /// Returns the claim ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after `CLM-`
    pub fn suffix(&self) -> &str {
        &self.0[CLAIM_ID_PREFIX.len()..]
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClaimId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClaimId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ClaimId> for String {
    fn from(id: ClaimId) -> Self {
        id.0
    }
}

impl AsRef<str> for ClaimId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_id_creation() {
        let id = PracticeId::new("practice_123").unwrap();
        assert_eq!(id.as_str(), "practice_123");
        assert_eq!(id.to_string(), "practice_123");
    }

    #[test]
    fn test_tenant_ids_reject_blank() {
        assert!(PracticeId::new("").is_err());
        assert!(TherapistId::new("   ").is_err());
        assert_eq!(
            PatientId::new("").unwrap_err(),
            "Patient ID cannot be empty"
        );
    }

    #[test]
    fn test_patient_id_from_str() {
        let id: PatientId = "patient_789".parse().unwrap();
        assert_eq!(id.into_inner(), "patient_789");
    }

    #[test]
    fn test_claim_id_parse_valid() {
        let id = ClaimId::parse("CLM-ABCD1234").unwrap();
        assert_eq!(id.as_str(), "CLM-ABCD1234");
        assert_eq!(id.suffix(), "ABCD1234");
    }

    #[test]
    fn test_claim_id_rejects_bad_shapes() {
        assert!(ClaimId::parse("ABCD1234").is_err());
        assert!(ClaimId::parse("CLM-ABC").is_err());
        assert!(ClaimId::parse("CLM-ABCD12345").is_err());
        assert!(ClaimId::parse("CLM-abcd1234").is_err());
        assert!(ClaimId::parse("CLM-ABCD-123").is_err());
    }

    #[test]
    fn test_claim_id_from_suffix() {
        let id = ClaimId::from_suffix("0000FFFF").unwrap();
        assert_eq!(id.as_str(), "CLM-0000FFFF");
    }

    #[test]
    fn test_claim_id_serializes_as_plain_string() {
        let id = ClaimId::parse("CLM-ABCD1234").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"CLM-ABCD1234\"");

        let back: ClaimId = serde_json::from_str("\"CLM-ABCD1234\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ClaimId>("\"nope\"").is_err());
    }
}
