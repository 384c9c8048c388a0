//! Session payload domain model
//!
//! A [`SessionPayload`] is the input of the claim pipeline: one therapy
//! session described well enough to be billed. It is built once per request
//! and never mutated, so its fields are only reachable through accessors.

use super::ids::{PatientId, PracticeId, TherapistId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Candidate claim inputs for a single therapy session
///
/// Codes and the payer id are trimmed and uppercased on construction.
/// Amounts are exact decimals; they are never compared as floats.
///
/// # Examples
///
/// ```
/// use clara::domain::SessionPayload;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let payload = SessionPayload::builder()
///     .practice_id("practice_123")
///     .therapist_id("therapist_456")
///     .patient_id("patient_789")
///     .session_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
///     .cpt_code(" 90837 ")
///     .icd10_code("f33.1")
///     .fee(dec!(175.00))
///     .copay_collected(dec!(25.00))
///     .payer_id("bcbsma")
///     .build()
///     .unwrap();
///
/// assert_eq!(payload.cpt_code(), "90837");
/// assert_eq!(payload.icd10_code(), "F33.1");
/// assert_eq!(payload.payer_id(), "BCBSMA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPayload {
    practice_id: PracticeId,
    therapist_id: TherapistId,
    patient_id: PatientId,
    session_date: NaiveDate,
    cpt_code: String,
    icd10_code: String,
    fee: Decimal,
    copay_collected: Decimal,
    payer_id: String,
}

impl SessionPayload {
    /// Creates a new builder for constructing a SessionPayload
    pub fn builder() -> SessionPayloadBuilder {
        SessionPayloadBuilder::default()
    }

    pub fn practice_id(&self) -> &PracticeId {
        &self.practice_id
    }

    pub fn therapist_id(&self) -> &TherapistId {
        &self.therapist_id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn session_date(&self) -> NaiveDate {
        self.session_date
    }

    pub fn cpt_code(&self) -> &str {
        &self.cpt_code
    }

    pub fn icd10_code(&self) -> &str {
        &self.icd10_code
    }

    pub fn fee(&self) -> Decimal {
        self.fee
    }

    pub fn copay_collected(&self) -> Decimal {
        self.copay_collected
    }

    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }

    /// Returns a builder pre-filled with this payload's values.
    ///
    /// Handy for deriving a variant of a payload without touching the original.
    pub fn to_builder(&self) -> SessionPayloadBuilder {
        SessionPayloadBuilder {
            practice_id: Some(self.practice_id.as_str().to_string()),
            therapist_id: Some(self.therapist_id.as_str().to_string()),
            patient_id: Some(self.patient_id.as_str().to_string()),
            session_date: Some(self.session_date),
            cpt_code: Some(self.cpt_code.clone()),
            icd10_code: Some(self.icd10_code.clone()),
            fee: Some(self.fee),
            copay_collected: Some(self.copay_collected),
            payer_id: Some(self.payer_id.clone()),
        }
    }
}

/// Trims and uppercases a code-like value
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Builder for constructing SessionPayload instances
///
/// Codes may be empty: an empty diagnosis or procedure code is a business-rule
/// violation reported by the validators, not a construction failure.
#[derive(Debug, Default, Clone)]
pub struct SessionPayloadBuilder {
    practice_id: Option<String>,
    therapist_id: Option<String>,
    patient_id: Option<String>,
    session_date: Option<NaiveDate>,
    cpt_code: Option<String>,
    icd10_code: Option<String>,
    fee: Option<Decimal>,
    copay_collected: Option<Decimal>,
    payer_id: Option<String>,
}

impl SessionPayloadBuilder {
    /// Creates a new SessionPayloadBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn practice_id(mut self, id: impl Into<String>) -> Self {
        self.practice_id = Some(id.into());
        self
    }

    pub fn therapist_id(mut self, id: impl Into<String>) -> Self {
        self.therapist_id = Some(id.into());
        self
    }

    pub fn patient_id(mut self, id: impl Into<String>) -> Self {
        self.patient_id = Some(id.into());
        self
    }

    pub fn session_date(mut self, date: NaiveDate) -> Self {
        self.session_date = Some(date);
        self
    }

    pub fn cpt_code(mut self, code: impl Into<String>) -> Self {
        self.cpt_code = Some(code.into());
        self
    }

    pub fn icd10_code(mut self, code: impl Into<String>) -> Self {
        self.icd10_code = Some(code.into());
        self
    }

    pub fn fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Sets the copay collected at time of service (defaults to `0.00`)
    pub fn copay_collected(mut self, copay: Decimal) -> Self {
        self.copay_collected = Some(copay);
        self
    }

    pub fn payer_id(mut self, id: impl Into<String>) -> Self {
        self.payer_id = Some(id.into());
        self
    }

    /// Builds the SessionPayload
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or an identifier is blank
    pub fn build(self) -> Result<SessionPayload, String> {
        let practice_id = PracticeId::new(self.practice_id.ok_or("practice_id is required")?)?;
        let therapist_id =
            TherapistId::new(self.therapist_id.ok_or("therapist_id is required")?)?;
        let patient_id = PatientId::new(self.patient_id.ok_or("patient_id is required")?)?;

        Ok(SessionPayload {
            practice_id,
            therapist_id,
            patient_id,
            session_date: self.session_date.ok_or("session_date is required")?,
            cpt_code: normalize_code(&self.cpt_code.ok_or("cpt_code is required")?),
            icd10_code: normalize_code(&self.icd10_code.ok_or("icd10_code is required")?),
            fee: self.fee.ok_or("fee is required")?,
            copay_collected: self
                .copay_collected
                .unwrap_or_else(|| Decimal::new(0, 2)),
            payer_id: normalize_code(&self.payer_id.ok_or("payer_id is required")?),
        })
    }
}
