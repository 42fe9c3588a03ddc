#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{MixError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lab-mix")]
#[command(about = "Reagent volumes for PCR mixes, Golden Gate ligations and culture media")]
pub struct CliConfig {
    /// Calculation to run (pcr_inicial, pcr_dream_taq, lv1, lv2, medios)
    pub operation: Option<String>,

    /// Read the JSON request from this file (stdin when neither --input nor --json is given)
    #[arg(short, long, conflicts_with = "json")]
    pub input: Option<String>,

    /// Inline JSON request body
    #[arg(long)]
    pub json: Option<String>,

    /// TOML file overriding the default input values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Pretty-print the JSON result")]
    pub pretty: bool,

    #[arg(long, help = "List the available calculations and exit")]
    pub list: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.list && self.operation.is_none() {
            return Err(MixError::ConfigError {
                message: "an operation is required unless --list is given".to_string(),
            });
        }
        if let Some(input) = &self.input {
            validate_path("input", input)?;
        }
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation_and_inline_json() {
        let config = CliConfig::parse_from([
            "lab-mix",
            "medios",
            "--json",
            r#"{"tipo_medio":"rooting"}"#,
            "--pretty",
        ]);

        assert_eq!(config.operation.as_deref(), Some("medios"));
        assert_eq!(config.json.as_deref(), Some(r#"{"tipo_medio":"rooting"}"#));
        assert!(config.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_operation_required_without_list() {
        let config = CliConfig::parse_from(["lab-mix"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["lab-mix", "--list"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_conflicts_with_json() {
        let parsed =
            CliConfig::try_parse_from(["lab-mix", "lv1", "--input", "a.json", "--json", "{}"]);
        assert!(parsed.is_err());
    }
}
