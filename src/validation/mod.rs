//! Business-rule validation for claim preparation
//!
//! Each rule is a single-responsibility [`ClaimValidator`]. Rules are
//! composed into a [`ValidatorChain`], which is what the preparation service
//! runs. Payer-specific rules are added by appending to a chain.
//!
//! # Examples
//!
//! ```
//! use clara::domain::SessionPayload;
//! use clara::validation::validate_session_payload;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let payload = SessionPayload::builder()
//!     .practice_id("practice_123")
//!     .therapist_id("therapist_456")
//!     .patient_id("patient_789")
//!     .session_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
//!     .cpt_code("99999")
//!     .icd10_code("F33.1")
//!     .fee(dec!(175.00))
//!     .payer_id("BCBSMA")
//!     .build()
//!     .unwrap();
//!
//! let errors = validate_session_payload(&payload);
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].contains("99999"));
//! ```

pub mod chain;
pub mod codes;
pub mod rules;

use crate::domain::SessionPayload;

pub use chain::ValidatorChain;
pub use codes::CodeTables;
pub use rules::{
    CopayNonNegativeValidator, CopayValidator, DiagnosisCodeValidator, FeeValidator,
    PayerIdValidator, PayerPolicy, ProcedureCodeValidator, ServiceDateValidator,
};

/// A single business rule
///
/// Implementations are pure: the same payload always yields the same
/// messages, and a violation is returned as a message rather than an error.
pub trait ClaimValidator: Send + Sync {
    /// Stable rule name, used in logs
    fn name(&self) -> &'static str;

    /// Returns one message per violated condition; empty means the rule passed
    fn validate(&self, payload: &SessionPayload) -> Vec<String>;
}

/// Validates a payload with the default chain (built-in tables, system clock)
pub fn validate_session_payload(payload: &SessionPayload) -> Vec<String> {
    ValidatorChain::default().validate(payload)
}
