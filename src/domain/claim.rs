//! Prepared claim and claim status
//!
//! [`PreparedClaim`] is the terminal output of the preparation pipeline. It
//! maps onto the 837P professional claim layout without generating EDI.

use super::ids::ClaimId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Claim status vocabulary
///
/// The wire strings are stable. The preparation pipeline only produces
/// [`ClaimStatus::ReadyForSubmission`] and [`ClaimStatus::Invalid`]; the rest
/// belong to the submission and adjudication lifecycle owned by downstream
/// systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Draft,
    ReadyForSubmission,
    Invalid,
    Submitted,
    Accepted,
    Rejected,
    Paid,
    Denied,
}

impl ClaimStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ClaimStatus; 8] = [
        ClaimStatus::Draft,
        ClaimStatus::ReadyForSubmission,
        ClaimStatus::Invalid,
        ClaimStatus::Submitted,
        ClaimStatus::Accepted,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
        ClaimStatus::Denied,
    ];

    /// Returns the wire-level string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::ReadyForSubmission => "READY_FOR_SUBMISSION",
            Self::Invalid => "INVALID",
            Self::Submitted => "SUBMITTED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Paid => "PAID",
            Self::Denied => "DENIED",
        }
    }

    /// Status implied by a list of validation errors
    pub fn from_validation(errors: &[String]) -> Self {
        if errors.is_empty() {
            Self::ReadyForSubmission
        } else {
            Self::Invalid
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown claim status: {s}"))
    }
}

/// Descriptive fields looked up from the entity directory
///
/// None of these affect the claim's status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEnrichment {
    pub patient_name: Option<String>,
    pub provider_npi: Option<String>,
    pub practice_npi: Option<String>,
    pub practice_tax_id: Option<String>,
}

/// Claim ready for EDI transformation, or rejected by validation
///
/// Built once by [`crate::core::preparation::ClaimPreparationService`] and
/// read-only afterwards. `validation_errors` is empty exactly when `status`
/// is `READY_FOR_SUBMISSION`; deserialization rejects any other pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPreparedClaim")]
pub struct PreparedClaim {
    claim_id: ClaimId,
    patient_id: String,
    /// Rendering provider (therapist)
    provider_id: String,
    /// Billing provider (practice)
    practice_id: String,
    payer_id: String,
    /// ISO-8601 `YYYY-MM-DD`
    service_date: String,
    cpt_code: String,
    /// Primary diagnosis
    icd10_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    charge_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    copay_amount: Decimal,
    status: ClaimStatus,
    validation_errors: Vec<String>,
    #[serde(flatten)]
    enrichment: ClaimEnrichment,
}

/// Wire shape of a [`PreparedClaim`], checked before it becomes one
#[derive(Deserialize)]
struct RawPreparedClaim {
    claim_id: ClaimId,
    patient_id: String,
    provider_id: String,
    practice_id: String,
    payer_id: String,
    service_date: String,
    cpt_code: String,
    icd10_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    charge_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    copay_amount: Decimal,
    status: ClaimStatus,
    validation_errors: Vec<String>,
    #[serde(flatten)]
    enrichment: ClaimEnrichment,
}

impl TryFrom<RawPreparedClaim> for PreparedClaim {
    type Error = String;

    fn try_from(raw: RawPreparedClaim) -> Result<Self, Self::Error> {
        let expected = ClaimStatus::from_validation(&raw.validation_errors);
        if raw.status != expected {
            return Err(format!(
                "Claim {} has status {} but {} validation errors",
                raw.claim_id,
                raw.status,
                raw.validation_errors.len()
            ));
        }

        Ok(Self::assemble(
            ClaimFields {
                claim_id: raw.claim_id,
                patient_id: raw.patient_id,
                provider_id: raw.provider_id,
                practice_id: raw.practice_id,
                payer_id: raw.payer_id,
                service_date: raw.service_date,
                cpt_code: raw.cpt_code,
                icd10_code: raw.icd10_code,
                charge_amount: raw.charge_amount,
                copay_amount: raw.copay_amount,
            },
            raw.validation_errors,
            raw.enrichment,
        ))
    }
}

/// Field values a [`PreparedClaim`] is assembled from
#[derive(Debug, Clone)]
pub struct ClaimFields {
    pub claim_id: ClaimId,
    pub patient_id: String,
    pub provider_id: String,
    pub practice_id: String,
    pub payer_id: String,
    pub service_date: String,
    pub cpt_code: String,
    pub icd10_code: String,
    pub charge_amount: Decimal,
    pub copay_amount: Decimal,
}

impl PreparedClaim {
    /// Assembles a claim; the status is derived from `validation_errors`
    pub fn assemble(
        fields: ClaimFields,
        validation_errors: Vec<String>,
        enrichment: ClaimEnrichment,
    ) -> Self {
        let status = ClaimStatus::from_validation(&validation_errors);
        Self {
            claim_id: fields.claim_id,
            patient_id: fields.patient_id,
            provider_id: fields.provider_id,
            practice_id: fields.practice_id,
            payer_id: fields.payer_id,
            service_date: fields.service_date,
            cpt_code: fields.cpt_code,
            icd10_code: fields.icd10_code,
            charge_amount: fields.charge_amount,
            copay_amount: fields.copay_amount,
            status,
            validation_errors,
            enrichment,
        }
    }

    pub fn claim_id(&self) -> &ClaimId {
        &self.claim_id
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn practice_id(&self) -> &str {
        &self.practice_id
    }

    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }

    pub fn service_date(&self) -> &str {
        &self.service_date
    }

    pub fn cpt_code(&self) -> &str {
        &self.cpt_code
    }

    pub fn icd10_code(&self) -> &str {
        &self.icd10_code
    }

    pub fn charge_amount(&self) -> Decimal {
        self.charge_amount
    }

    pub fn copay_amount(&self) -> Decimal {
        self.copay_amount
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn enrichment(&self) -> &ClaimEnrichment {
        &self.enrichment
    }

    /// Check if claim is ready for submission
    pub fn is_valid(&self) -> bool {
        self.status == ClaimStatus::ReadyForSubmission
    }

    /// HTTP status an API layer should answer with: 200 when ready, 422 when invalid
    pub fn http_status(&self) -> u16 {
        if self.is_valid() {
            200
        } else {
            422
        }
    }
}

/// Acknowledgement returned by [`crate::core::submission::ClaimSubmissionService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}
