//! Core business logic for Clara.
//!
//! # Modules
//!
//! - [`preparation`] - Claim preparation (validate, identify, enrich, assemble)
//! - [`submission`] - Submission of ready claims
//! - [`enrichment`] - Identity lookups attached to prepared claims
//! - [`claim_id`] - Claim identifier generation
//! - [`clock`] - Injectable source of "today"
//!
//! # Preparation Workflow
//!
//! 1. **Validate**: run the validator chain over the payload
//! 2. **Identify**: assign a fresh `CLM-XXXXXXXX` claim ID
//! 3. **Enrich**: attach patient name, NPIs and tax id
//! 4. **Assemble**: derive the status from the validation errors
//!
//! # Example
//!
//! ```rust,no_run
//! use clara::config::load_config;
//! use clara::core::clock::SystemClock;
//! use clara::core::preparation::ClaimPreparationService;
//! use clara::domain::SessionInput;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clara.toml")?;
//! let service = ClaimPreparationService::from_config(&config, Arc::new(SystemClock));
//!
//! let payload = SessionInput::from_json(&std::fs::read_to_string("session.json")?)?
//!     .into_payload()?;
//! let claim = service.prepare_claim(&payload)?;
//!
//! println!("{} {}", claim.claim_id(), claim.status());
//! # Ok(())
//! # }
//! ```

pub mod claim_id;
pub mod clock;
pub mod enrichment;
pub mod preparation;
pub mod submission;

pub use claim_id::{ClaimIdGenerator, SequentialClaimIdGenerator, UuidClaimIdGenerator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use enrichment::{ClaimEnricher, DirectoryEnricher, MockEnricher, NoEnrichment};
pub use preparation::{ClaimPreparationService, EnrichmentPolicy};
pub use submission::ClaimSubmissionService;
