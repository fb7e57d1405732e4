//! Uniform rank distribution
//!
//! Every rank in `[0, domain_size)` gets weight 1, so the sampled stream is
//! flat across the domain.

use super::{check_domain, Distribution, DistributionError, WeightVector};

/// Flat distribution over the rank domain
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDistribution;

impl Distribution for UniformDistribution {
    fn weights(&self, domain_size: usize) -> Result<WeightVector, DistributionError> {
        check_domain(domain_size)?;
        Ok(vec![1; domain_size])
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
