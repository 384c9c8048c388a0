//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClaraConfig;
use crate::domain::errors::ClaraError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClaraConfig
/// 4. Applies environment variable overrides (CLARA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use clara::config::loader::load_config;
///
/// let config = load_config("clara.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClaraConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClaraError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClaraError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Like [`load_config`], but falls back to [`ClaraConfig::default`] when the
/// file does not exist. Environment overrides still apply.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ClaraConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = ClaraConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text (substitution, overrides, validation)
pub fn load_config_str(contents: &str) -> Result<ClaraConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ClaraConfig = toml::from_str(&contents)
        .map_err(|e| ClaraError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &ClaraConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ClaraError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ClaraError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ClaraError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using CLARA_* prefix
///
/// Environment variables follow the pattern: CLARA_<SECTION>_<KEY>
/// For example: CLARA_APPLICATION_LOG_LEVEL, CLARA_ENRICHMENT_MODE
fn apply_env_overrides(config: &mut ClaraConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CLARA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Validation overrides
    if let Ok(val) = std::env::var("CLARA_VALIDATION_ENFORCE_KNOWN_PAYERS") {
        config.validation.enforce_known_payers =
            parse_bool("CLARA_VALIDATION_ENFORCE_KNOWN_PAYERS", &val)?;
    }

    // Enrichment overrides
    if let Ok(val) = std::env::var("CLARA_ENRICHMENT_MODE") {
        config.enrichment.mode = val.parse().map_err(ClaraError::Configuration)?;
    }
    if let Ok(val) = std::env::var("CLARA_ENRICHMENT_STRICT") {
        config.enrichment.strict = parse_bool("CLARA_ENRICHMENT_STRICT", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CLARA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("CLARA_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("CLARA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        ClaraError::Configuration(format!(
            "Invalid boolean for {}: '{}' (expected true or false)",
            name, value
        ))
    })
}
