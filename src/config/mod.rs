//! Configuration management for Clara.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `CLARA_*`
//! environment overrides and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clara::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clara.toml")?;
//!
//! println!("Log level: {}", config.application.log_level);
//! println!("Enrichment: {}", config.enrichment.mode);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ValidationConfig`] - Optional rules (payer enforcement)
//! - [`CodesConfig`] - Procedure codes and payers added to the built-ins
//! - [`EnrichmentConfig`] - Enrichment source and strictness
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [validation]
//! enforce_known_payers = false
//!
//! [codes.procedure_codes]
//! 90899 = "Unlisted psychiatric service"
//!
//! [codes.payers]
//! TRICARE = "TRICARE"
//!
//! [enrichment]
//! mode = "mock"
//! strict = false
//! practice_tax_id = "${CLARA_PRACTICE_TAX_ID}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, load_config_str};
pub use schema::{
    ApplicationConfig, ClaraConfig, CodesConfig, EnrichmentConfig, EnrichmentMode, LoggingConfig,
    ValidationConfig,
};
