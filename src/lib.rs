pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::toml_config::DefaultsConfig;
pub use crate::core::engine::{CalculationEngine, Operation};
pub use crate::utils::error::{MixError, Result};
