// Clara - Therapy Session Claim Preparation
// Copyright (c) 2025 Clara Contributors
// Licensed under the MIT License

//! # Clara - Therapy Session Claim Preparation
//!
//! Clara turns a documented therapy session into an insurance claim that is
//! either ready for submission or carries the full list of reasons it is not.
//!
//! ## Overview
//!
//! This library provides:
//! - **Input parsing** of session documents with field-level error reporting
//! - **Validation** through an ordered, extensible chain of business rules
//! - **Preparation** of claims with generated `CLM-XXXXXXXX` identifiers
//! - **Enrichment** with patient names, NPIs and tax ids
//! - **Submission** of ready claims (mock clearinghouse)
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Preparation, submission, enrichment and ID generation
//! - [`validation`] - Business-rule validators and code tables
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use clara::core::preparation::ClaimPreparationService;
//! use clara::domain::{ClaimStatus, SessionInput};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = r#"{
//!     "practice_id": "practice_123",
//!     "therapist_id": "therapist_456",
//!     "patient_id": "patient_789",
//!     "session_date": "2025-03-14",
//!     "cpt_code": "90837",
//!     "icd10_code": "F33.1",
//!     "fee": "175.00",
//!     "copay_collected": "25.00",
//!     "payer_id": "BCBSMA"
//! }"#;
//!
//! let payload = SessionInput::from_json(body)?.into_payload()?;
//! let claim = ClaimPreparationService::default().prepare_claim(&payload)?;
//!
//! assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation Errors Are Data
//!
//! A claim that breaks business rules is still returned: its status is
//! `INVALID` and `validation_errors` lists every violated rule, in rule order.
//! [`domain::ClaraError`] is reserved for malformed input, configuration
//! problems and failures outside the claim itself.
//!
//! ## Logging
//!
//! Clara uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(claim_id = "CLM-1A2B3C4D", "Claim prepared");
//! warn!(payer_id = "ACME", "Unrecognized payer");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod validation;
