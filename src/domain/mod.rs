//! Domain models and types for Clara.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PracticeId`], [`TherapistId`], [`PatientId`], [`ClaimId`])
//! - **Pipeline input** ([`SessionPayload`]) and the raw request layer in front of it ([`SessionInput`])
//! - **Pipeline output** ([`PreparedClaim`], [`ClaimStatus`], [`SubmissionReceipt`])
//! - **Error types** ([`ClaraError`], [`EnrichmentError`], [`InputErrors`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use clara::domain::SessionPayload;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! # fn example() -> Result<(), String> {
//! let payload = SessionPayload::builder()
//!     .practice_id("practice_123")
//!     .therapist_id("therapist_456")
//!     .patient_id("patient_789")
//!     .session_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
//!     .cpt_code("90837")
//!     .icd10_code("F33.1")
//!     .fee(dec!(175.00))
//!     .payer_id("BCBSMA")
//!     .build()?;
//! assert_eq!(payload.copay_collected(), dec!(0.00));
//! # Ok(())
//! # }
//! ```

pub mod claim;
pub mod errors;
pub mod ids;
pub mod input;
pub mod payload;
pub mod result;

pub use claim::{ClaimEnrichment, ClaimFields, ClaimStatus, PreparedClaim, SubmissionReceipt};
pub use errors::{ClaraError, EnrichmentError};
pub use ids::{ClaimId, PatientId, PracticeId, TherapistId};
pub use input::{FieldError, InputErrors, InvalidInputResponse, SessionInput};
pub use payload::{SessionPayload, SessionPayloadBuilder};
pub use result::Result;
