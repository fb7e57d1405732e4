//! CLI to Config conversion utilities

use crate::config::cli;
use crate::distribution::DistributionKind;
use anyhow::{Context, Result};

/// Parse a comma-joined weight list (e.g. "4,0,1")
pub fn parse_weights(s: &str) -> Result<Vec<u64>> {
    let weights = s
        .split(',')
        .map(|w| {
            w.trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid weight '{}' in: {}", w, s))
        })
        .collect::<Result<Vec<u64>>>()?;

    if weights.iter().all(|&w| w == 0) {
        anyhow::bail!("Weight list must contain a positive weight: {}", s);
    }

    Ok(weights)
}

/// Number of ranks in `[0, max_rank]`
pub fn domain_size(max_rank: u64) -> Result<usize> {
    usize::try_from(max_rank)
        .ok()
        .and_then(|r| r.checked_add(1))
        .ok_or_else(|| anyhow::anyhow!("max_rank {} is too large", max_rank))
}

/// Convert CLI DistributionType to DistributionKind
pub fn convert_distribution_type(cli_type: cli::DistributionType) -> DistributionKind {
    match cli_type {
        cli::DistributionType::Geometric => DistributionKind::Geometric,
        cli::DistributionType::Uniform => DistributionKind::Uniform,
    }
}
