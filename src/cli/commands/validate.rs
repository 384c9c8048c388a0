//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Clara configuration file.

use crate::cli::exit_codes;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(exit_codes::CONFIG_ERROR);
            }
        };

        let tables = config.code_tables();

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Enforce Known Payers: {}",
            config.validation.enforce_known_payers
        );
        println!(
            "  Procedure Codes: {} ({} custom)",
            tables.procedure_codes().count(),
            config.codes.procedure_codes.len()
        );
        println!(
            "  Payers: {} ({} custom)",
            tables.payers().count(),
            config.codes.payers.len()
        );
        println!("  Enrichment Mode: {}", config.enrichment.mode);
        println!("  Strict Enrichment: {}", config.enrichment.strict);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_missing_file_is_config_error() {
        let code = ValidateArgs {}
            .execute("definitely-missing-clara.toml")
            .unwrap();
        assert_eq!(code, exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_validate_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[enrichment]\nprovider_npi = \"123\"").unwrap();
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, exit_codes::CONFIG_ERROR);
    }
}
