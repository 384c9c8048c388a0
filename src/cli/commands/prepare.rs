//! Prepare command implementation
//!
//! Reads one session document, prepares a claim and prints it as JSON on
//! stdout. The exit code mirrors the HTTP status an API would answer with:
//! 0 for a ready claim (200), 3 for an invalid one (422), 4 for a malformed
//! document (400).

use crate::cli::exit_codes;
use crate::config::{load_config_or_default, ClaraConfig};
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::preparation::ClaimPreparationService;
use crate::core::submission::ClaimSubmissionService;
use crate::domain::{Result, SessionInput};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;

/// Arguments for the prepare command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Session JSON file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Date to treat as today for the service-date rule (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Submit the claim when it is ready
    #[arg(long)]
    pub submit: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Result of preparing one document
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOutcome {
    pub exit_code: i32,
    pub body: Value,
}

impl PrepareArgs {
    /// Execute the prepare command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::debug!(input = %self.input, "Starting prepare command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(exit_codes::CONFIG_ERROR);
            }
        };

        let document = self.read_input()?;

        let outcome = match self.prepare_document(&config, &document) {
            Ok(outcome) => outcome,
            Err(e) => {
                crate::log_error_with_context!(&e, "Claim preparation failed");
                eprintln!("❌ Claim preparation failed: {e}");
                return Ok(exit_codes::FATAL);
            }
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&outcome.body)?
        } else {
            serde_json::to_string(&outcome.body)?
        };
        println!("{rendered}");

        Ok(outcome.exit_code)
    }

    /// Prepares (and optionally submits) the claim described by `document`
    ///
    /// # Errors
    ///
    /// Only fails when strict enrichment is configured and enrichment fails.
    pub fn prepare_document(
        &self,
        config: &ClaraConfig,
        document: &str,
    ) -> Result<PrepareOutcome> {
        let parsed = SessionInput::from_json(document).and_then(SessionInput::into_payload);
        let payload = match parsed {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::info!(error_count = errors.len(), "Malformed session document");
                return Ok(PrepareOutcome {
                    exit_code: exit_codes::MALFORMED_INPUT,
                    body: serde_json::to_value(errors.to_response())?,
                });
            }
        };

        let clock: Arc<dyn Clock> = match self.today {
            Some(today) => Arc::new(FixedClock(today)),
            None => Arc::new(SystemClock),
        };
        let service = ClaimPreparationService::from_config(config, clock);
        let claim = service.prepare_claim(&payload)?;

        let exit_code = if claim.is_valid() {
            exit_codes::SUCCESS
        } else {
            exit_codes::CLAIM_INVALID
        };

        let body = if self.submit && claim.is_valid() {
            let receipt = ClaimSubmissionService::new().submit(&claim)?;
            let mut body = serde_json::Map::new();
            body.insert("claim".to_string(), serde_json::to_value(&claim)?);
            body.insert("submission".to_string(), serde_json::to_value(&receipt)?);
            Value::Object(body)
        } else {
            serde_json::to_value(&claim)?
        };

        Ok(PrepareOutcome { exit_code, body })
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if self.input == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read session document from stdin")?;
            Ok(buffer)
        } else {
            std::fs::read_to_string(&self.input)
                .with_context(|| format!("Failed to read session document {}", self.input))
        }
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{value}'. Use YYYY-MM-DD"))
}
