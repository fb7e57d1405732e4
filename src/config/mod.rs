//! Configuration module
//!
//! Handles CLI argument parsing, TOML case-configuration files, and
//! validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::cases::offline::DEFAULT_MODEL_PATH;
use crate::distribution::DistributionKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Queue counts swept by default
pub const DEFAULT_QUEUE_COUNTS: [usize; 6] = [2, 3, 5, 7, 11, 17];

/// Rank counts swept by default
pub const DEFAULT_RANK_COUNTS: [usize; 5] = [13, 19, 23, 31, 37];

/// Case generation settings as read from a file and the command line
///
/// `distribution` and `out_dir` are required but may come from either
/// source, so both stay optional until [`CaseConfig::into_plan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    #[serde(default)]
    pub distribution: Option<DistributionKind>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    /// Offline model binary
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_queue_counts")]
    pub queue_counts: Vec<usize>,
    #[serde(default = "default_rank_counts")]
    pub rank_counts: Vec<usize>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_queue_counts() -> Vec<usize> {
    DEFAULT_QUEUE_COUNTS.to_vec()
}

fn default_rank_counts() -> Vec<usize> {
    DEFAULT_RANK_COUNTS.to_vec()
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            distribution: None,
            out_dir: None,
            model_path: default_model_path(),
            queue_counts: default_queue_counts(),
            rank_counts: default_rank_counts(),
        }
    }
}

/// Names of required settings that are still unset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSettings(pub Vec<&'static str>);

impl fmt::Display for MissingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required option(s): {}", self.0.join(", "))
    }
}

impl std::error::Error for MissingSettings {}

impl CaseConfig {
    /// Resolve into a plan, or report which required settings are missing
    pub fn into_plan(self) -> Result<CasePlan, MissingSettings> {
        match (self.distribution, self.out_dir) {
            (Some(distribution), Some(out_dir)) => Ok(CasePlan {
                distribution,
                out_dir,
                model_path: self.model_path,
                queue_counts: self.queue_counts,
                rank_counts: self.rank_counts,
            }),
            (distribution, out_dir) => {
                let mut missing = Vec::new();
                if distribution.is_none() {
                    missing.push("--distribution");
                }
                if out_dir.is_none() {
                    missing.push("--out-dir");
                }
                Err(MissingSettings(missing))
            }
        }
    }
}

/// Fully resolved case generation run
#[derive(Debug, Clone, PartialEq)]
pub struct CasePlan {
    pub distribution: DistributionKind,
    pub out_dir: PathBuf,
    pub model_path: PathBuf,
    pub queue_counts: Vec<usize>,
    pub rank_counts: Vec<usize>,
}

impl fmt::Display for CasePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} distribution, queues {:?} x ranks {:?}, model {}, output {}",
            self.distribution,
            self.queue_counts,
            self.rank_counts,
            self.model_path.display(),
            self.out_dir.display()
        )
    }
}
