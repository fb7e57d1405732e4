//! Configuration validation

use super::CasePlan;
use crate::distribution::geometric::GEOMETRIC_MAX_DOMAIN;
use crate::distribution::DistributionKind;
use anyhow::Result;

/// Validate a resolved case plan
pub fn validate_plan(plan: &CasePlan) -> Result<()> {
    validate_counts("queue_counts", &plan.queue_counts)?;
    validate_counts("rank_counts", &plan.rank_counts)?;
    validate_distribution(&plan.distribution, &plan.rank_counts)?;

    if plan.out_dir.exists() && !plan.out_dir.is_dir() {
        anyhow::bail!("out_dir is not a directory: {}", plan.out_dir.display());
    }

    Ok(())
}

fn validate_counts(field: &str, counts: &[usize]) -> Result<()> {
    if counts.is_empty() {
        anyhow::bail!("{} must not be empty", field);
    }

    if let Some(pos) = counts.iter().position(|&c| c == 0) {
        anyhow::bail!("{}[{}] must be at least 1", field, pos);
    }

    // Duplicates would rewrite the same case file
    for (i, count) in counts.iter().enumerate() {
        if counts[..i].contains(count) {
            anyhow::bail!("{} contains {} more than once", field, count);
        }
    }

    Ok(())
}

/// Check every rank count is a domain the distribution can describe
fn validate_distribution(dist: &DistributionKind, rank_counts: &[usize]) -> Result<()> {
    match dist {
        DistributionKind::Uniform => {}
        DistributionKind::Geometric => {
            if let Some(&n) = rank_counts.iter().find(|&&n| n > GEOMETRIC_MAX_DOMAIN) {
                anyhow::bail!(
                    "geometric distribution supports at most {} ranks, rank_counts has {}",
                    GEOMETRIC_MAX_DOMAIN,
                    n
                );
            }
        }
        DistributionKind::Weighted { weights } => {
            if weights.iter().all(|&w| w == 0) {
                anyhow::bail!("weighted distribution needs at least one positive weight");
            }
            if let Some(&n) = rank_counts.iter().find(|&&n| n != weights.len()) {
                anyhow::bail!(
                    "weighted distribution has {} weights but rank_counts has {}",
                    weights.len(),
                    n
                );
            }
        }
    }
    Ok(())
}
