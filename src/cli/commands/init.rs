//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::exit_codes;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "clara.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Clara configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_codes::CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Add practice-specific CPT codes or payers under [codes]");
                println!("  3. Validate configuration: clara validate-config");
                println!("  4. Prepare a claim: clara prepare --input session.json");
                println!();
                Ok(exit_codes::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_codes::FATAL)
            }
        }
    }

    /// Sample configuration with every option and its default
    pub fn sample_config() -> &'static str {
        r#"# Clara Configuration File
# Therapy session claim preparation

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Validation
# ============================================================================
[validation]
# Reject claims whose payer is not listed below or built in.
# When false, unknown payers are accepted and logged as a warning.
enforce_known_payers = false

# ============================================================================
# Code Tables
# Entries are added to the built-in tables (or replace a built-in entry).
# ============================================================================
[codes.procedure_codes]
# 90899 = "Unlisted psychiatric service"

[codes.payers]
# TRICARE = "TRICARE"

# ============================================================================
# Enrichment
# ============================================================================
[enrichment]
# Source of patient names, NPIs and tax ids: mock | none
mode = "mock"

# Fail preparation when enrichment fails (otherwise fields are left empty)
strict = false

# Values used by the mock source
provider_npi = "1234567890"
practice_npi = "0987654321"
practice_tax_id = "XX-XXXXXXX"
# practice_tax_id = "${CLARA_PRACTICE_TAX_ID}"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_str, ClaraConfig};
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_matches_defaults() {
        let config = load_config_str(InitArgs::sample_config()).unwrap();
        assert_eq!(config, ClaraConfig::default());
    }

    #[test]
    fn test_init_writes_file_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clara.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().unwrap(), exit_codes::SUCCESS);
        assert!(output.exists());
        assert_eq!(args.execute().unwrap(), exit_codes::CONFIG_ERROR);

        let forced = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(forced.execute().unwrap(), exit_codes::SUCCESS);
    }
}
