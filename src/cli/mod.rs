//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Clara using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Clara - therapy session claim preparation
#[derive(Parser, Debug)]
#[command(name = "clara")]
#[command(version, about, long_about = None)]
#[command(author = "Clara Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "clara.toml", env = "CLARA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLARA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare a claim from a session JSON document
    Prepare(commands::prepare::PrepareArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// List allowed procedure codes and known payers
    Codes(commands::codes::CodesArgs),
}

/// Process exit codes shared by all commands
pub mod exit_codes {
    /// Success (for `prepare`: the claim is ready for submission)
    pub const SUCCESS: i32 = 0;
    /// Configuration could not be loaded or is invalid
    pub const CONFIG_ERROR: i32 = 2;
    /// The prepared claim failed business-rule validation
    pub const CLAIM_INVALID: i32 = 3;
    /// The input document was malformed
    pub const MALFORMED_INPUT: i32 = 4;
    /// Anything else
    pub const FATAL: i32 = 5;
}
