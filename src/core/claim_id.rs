//! Claim identifier generation
//!
//! IDs are random and independent of the payload. Collisions are unlikely
//! but not impossible; uniqueness has to be enforced where claims are stored.

use crate::domain::ids::{ClaimId, CLAIM_ID_SUFFIX_LEN};
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

/// Produces a fresh claim identifier per call
pub trait ClaimIdGenerator: Send + Sync {
    fn generate(&self) -> ClaimId;
}

/// `CLM-` followed by the first 8 hex digits of a v4 UUID, uppercased
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidClaimIdGenerator;

impl ClaimIdGenerator for UuidClaimIdGenerator {
    fn generate(&self) -> ClaimId {
        let uuid = Uuid::new_v4().simple().to_string();
        ClaimId::from_trusted_suffix(&uuid[..CLAIM_ID_SUFFIX_LEN].to_uppercase())
    }
}

/// Deterministic generator: `CLM-00000001`, `CLM-00000002`, ...
///
/// For tests and replay tooling. Wraps after `FFFFFFFF`.
#[derive(Debug, Default)]
pub struct SequentialClaimIdGenerator {
    next: AtomicU32,
}

impl SequentialClaimIdGenerator {
    /// Starts counting at `start`
    pub fn starting_at(start: u32) -> Self {
        Self {
            next: AtomicU32::new(start),
        }
    }
}

impl ClaimIdGenerator for SequentialClaimIdGenerator {
    fn generate(&self) -> ClaimId {
        let value = self.next.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        ClaimId::from_trusted_suffix(&format!("{value:08X}"))
    }
}
