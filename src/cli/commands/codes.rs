//! Codes command implementation
//!
//! Lists the procedure codes and payers in effect for the loaded
//! configuration (built-ins plus `[codes]` additions).

use crate::cli::exit_codes;
use crate::config::load_config_or_default;
use crate::validation::CodeTables;
use clap::Args;

/// Arguments for the codes command
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CodesArgs {
    /// Execute the codes command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG_ERROR);
            }
        };

        let tables = config.code_tables();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&Self::to_json(&tables))?);
        } else {
            print!("{}", Self::render(&tables));
        }
        Ok(exit_codes::SUCCESS)
    }

    fn render(tables: &CodeTables) -> String {
        let mut out = String::from("Procedure codes (CPT):\n");
        for (code, description) in tables.procedure_codes() {
            out.push_str(&format!("  {code:<8} {description}\n"));
        }
        out.push_str("\nPayers:\n");
        for (payer_id, name) in tables.payers() {
            out.push_str(&format!("  {payer_id:<10} {name}\n"));
        }
        out
    }

    fn to_json(tables: &CodeTables) -> serde_json::Value {
        let procedure_codes: serde_json::Map<String, serde_json::Value> = tables
            .procedure_codes()
            .map(|(code, description)| (code.to_string(), description.into()))
            .collect();
        let payers: serde_json::Map<String, serde_json::Value> = tables
            .payers()
            .map(|(payer_id, name)| (payer_id.to_string(), name.into()))
            .collect();

        let mut root = serde_json::Map::new();
        root.insert("procedure_codes".to_string(), procedure_codes.into());
        root.insert("payers".to_string(), payers.into());
        root.into()
    }
}
