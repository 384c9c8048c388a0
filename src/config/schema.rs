//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! usable configuration.

use crate::validation::CodeTables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Main Clara configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaraConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Optional validation rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Additional procedure codes and payers
    #[serde(default)]
    pub codes: CodesConfig,

    /// Where enrichment data comes from
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClaraConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.codes.validate()?;
        self.enrichment.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Built-in code tables with the `[codes]` entries merged over them
    pub fn code_tables(&self) -> CodeTables {
        self.codes.to_code_tables()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject claims whose payer is not in the payer table.
    /// When false, unknown payers are only logged.
    #[serde(default)]
    pub enforce_known_payers: bool,
}

/// Extra code-table entries, keyed by code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodesConfig {
    /// CPT code -> description
    #[serde(default)]
    pub procedure_codes: BTreeMap<String, String>,

    /// Payer id -> payer name
    #[serde(default)]
    pub payers: BTreeMap<String, String>,
}

impl CodesConfig {
    fn validate(&self) -> Result<(), String> {
        for code in self.procedure_codes.keys() {
            let code = code.trim();
            if code.len() != 5 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(format!(
                    "Invalid codes.procedure_codes entry '{code}'. CPT codes must be 5 alphanumeric characters"
                ));
            }
        }

        if self.payers.keys().any(|payer| payer.trim().is_empty()) {
            return Err("codes.payers keys cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn to_code_tables(&self) -> CodeTables {
        CodeTables::builtin()
            .with_procedure_codes(
                self.procedure_codes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
            .with_payers(self.payers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Enrichment source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentMode {
    /// Placeholder identity values
    #[default]
    Mock,
    /// Leave enrichment fields empty
    None,
}

impl fmt::Display for EnrichmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentMode::Mock => write!(f, "mock"),
            EnrichmentMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for EnrichmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(EnrichmentMode::Mock),
            "none" => Ok(EnrichmentMode::None),
            _ => Err(format!(
                "Invalid enrichment mode '{s}'. Must be one of: mock, none"
            )),
        }
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Enrichment source (mock, none)
    #[serde(default)]
    pub mode: EnrichmentMode,

    /// Fail claim preparation when enrichment fails
    #[serde(default)]
    pub strict: bool,

    /// Rendering provider NPI used by the mock source
    #[serde(default = "default_provider_npi")]
    pub provider_npi: String,

    /// Billing provider NPI used by the mock source
    #[serde(default = "default_practice_npi")]
    pub practice_npi: String,

    /// Practice tax id used by the mock source
    #[serde(default = "default_practice_tax_id")]
    pub practice_tax_id: String,
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, npi) in [
            ("provider_npi", &self.provider_npi),
            ("practice_npi", &self.practice_npi),
        ] {
            if npi.len() != 10 || !npi.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!(
                    "Invalid enrichment.{key} '{npi}'. NPIs must be exactly 10 digits"
                ));
            }
        }

        if self.practice_tax_id.trim().is_empty() {
            return Err("enrichment.practice_tax_id cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            mode: EnrichmentMode::default(),
            strict: false,
            provider_npi: default_provider_npi(),
            practice_npi: default_practice_npi(),
            practice_tax_id: default_practice_tax_id(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider_npi() -> String {
    "1234567890".to_string()
}

fn default_practice_npi() -> String {
    "0987654321".to_string()
}

fn default_practice_tax_id() -> String {
    "XX-XXXXXXX".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClaraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClaraConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClaraConfig::default());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.enrichment.mode, EnrichmentMode::Mock);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ClaraConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level 'verbose'"));
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = ClaraConfig::default();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_procedure_code_key() {
        let mut config = ClaraConfig::default();
        config
            .codes
            .procedure_codes
            .insert("9083".to_string(), "Too short".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("'9083'"));
    }

    #[test]
    fn test_blank_payer_key() {
        let mut config = ClaraConfig::default();
        config
            .codes
            .payers
            .insert("  ".to_string(), "Nobody".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_npi() {
        let mut config = ClaraConfig::default();
        config.enrichment.provider_npi = "12345".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("enrichment.provider_npi"));
    }

    #[test]
    fn test_code_tables_merge_over_builtins() {
        let mut config = ClaraConfig::default();
        config
            .codes
            .procedure_codes
            .insert("90899".to_string(), "Unlisted psychiatric service".to_string());
        config
            .codes
            .payers
            .insert("tricare".to_string(), "TRICARE".to_string());

        let tables = config.code_tables();
        assert!(tables.is_allowed_procedure("90837"));
        assert!(tables.is_allowed_procedure("90899"));
        assert!(tables.is_known_payer("BCBSMA"));
        assert!(tables.is_known_payer("TRICARE"));
    }

    #[test]
    fn test_enrichment_mode_from_str() {
        assert_eq!("MOCK".parse::<EnrichmentMode>().unwrap(), EnrichmentMode::Mock);
        assert_eq!("none".parse::<EnrichmentMode>().unwrap(), EnrichmentMode::None);
        assert!("directory".parse::<EnrichmentMode>().is_err());
    }
}
