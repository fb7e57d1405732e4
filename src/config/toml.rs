//! TOML case configuration parsing
//!
//! Every key is optional:
//!
//! ```toml
//! distribution = "geometric"
//! out_dir = "cases"
//! model_path = "./offline-model/offline-model"
//! queue_counts = [2, 3, 5]
//! rank_counts = [13, 19]
//! ```

use super::cli::CaseArgs;
use super::cli_convert::convert_distribution_type;
use super::CaseConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<CaseConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<CaseConfig> {
    let config: CaseConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(args: &CaseArgs, mut config: CaseConfig) -> CaseConfig {
    if let Some(distribution) = args.distribution {
        config.distribution = Some(convert_distribution_type(distribution));
    }
    if let Some(ref out_dir) = args.out_dir {
        config.out_dir = Some(out_dir.clone());
    }
    if let Some(ref model) = args.model {
        config.model_path = model.clone();
    }
    config
}

/// Load `--config` if given, then apply the remaining CLI options
pub fn load_case_config(args: &CaseArgs) -> Result<CaseConfig> {
    let base = match args.config {
        Some(ref path) => parse_toml_file(path)?,
        None => CaseConfig::default(),
    };
    Ok(merge_cli_with_config(args, base))
}
