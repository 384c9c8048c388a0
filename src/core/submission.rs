//! Claim submission
//!
//! Clearinghouse transmission is not implemented; [`ClaimSubmissionService`]
//! checks that the claim may be submitted and issues a mock receipt.

use crate::domain::{ClaimStatus, ClaraError, PreparedClaim, Result, SubmissionReceipt};
use chrono::Utc;
use uuid::Uuid;

/// Mock clearinghouse submission
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimSubmissionService;

impl ClaimSubmissionService {
    pub fn new() -> Self {
        Self
    }

    /// Submits a ready claim
    ///
    /// # Errors
    ///
    /// Returns [`ClaraError::Precondition`] if the claim is not
    /// `READY_FOR_SUBMISSION` or carries validation errors.
    pub fn submit(&self, claim: &PreparedClaim) -> Result<SubmissionReceipt> {
        if claim.status() != ClaimStatus::ReadyForSubmission
            || !claim.validation_errors().is_empty()
        {
            return Err(ClaraError::Precondition(format!(
                "Cannot submit invalid claim {} (status {})",
                claim.claim_id(),
                claim.status()
            )));
        }

        let receipt = SubmissionReceipt {
            submission_id: Uuid::new_v4().to_string(),
            claim_id: claim.claim_id().clone(),
            status: ClaimStatus::Submitted,
            message: "Claim submitted successfully (mock)".to_string(),
            submitted_at: Utc::now(),
        };

        crate::log_claim_submitted!(&receipt);
        Ok(receipt)
    }
}
