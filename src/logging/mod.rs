//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Console output on stderr
//! - Optional local JSON file logging with rotation
//!
//! Patient names and other enrichment details are never logged; claim logs
//! carry identifiers and outcomes only.
//!
//! # Example
//!
//! ```no_run
//! use clara::logging::init_logging;
//! use clara::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the outcome of a claim preparation
///
/// # Example
///
/// ```no_run
/// use clara::log_claim_prepared;
/// use clara::core::preparation::ClaimPreparationService;
/// # use clara::domain::SessionPayload;
/// # fn example(payload: &SessionPayload) -> clara::domain::Result<()> {
///
/// let claim = ClaimPreparationService::default().prepare_claim(payload)?;
/// log_claim_prepared!(&claim);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! log_claim_prepared {
    ($claim:expr) => {
        tracing::info!(
            claim_id = %$claim.claim_id(),
            practice_id = $claim.practice_id(),
            status = %$claim.status(),
            error_count = $claim.validation_errors().len(),
            "Claim prepared"
        );
    };
}

/// Log an accepted submission
#[macro_export]
macro_rules! log_claim_submitted {
    ($receipt:expr) => {
        tracing::info!(
            claim_id = %$receipt.claim_id,
            submission_id = %$receipt.submission_id,
            status = %$receipt.status,
            "Claim submitted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use clara::log_error_with_context;
/// use clara::domain::ClaraError;
///
/// let error = ClaraError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
