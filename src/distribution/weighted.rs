//! Explicitly weighted rank distribution
//!
//! The caller provides one integer weight per rank; the domain size is the
//! length of that list. Zero weights are allowed and simply never sampled.

use super::{check_domain, Distribution, DistributionError, WeightVector};

/// Caller-supplied weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedDistribution {
    weights: Vec<u64>,
}

impl WeightedDistribution {
    pub fn new(weights: Vec<u64>) -> Self {
        Self { weights }
    }

    /// Number of ranks implied by the weight list
    pub fn domain_size(&self) -> usize {
        self.weights.len()
    }
}

impl Distribution for WeightedDistribution {
    fn weights(&self, domain_size: usize) -> Result<WeightVector, DistributionError> {
        check_domain(domain_size)?;
        if domain_size != self.weights.len() {
            return Err(DistributionError::DomainMismatch {
                weights: self.weights.len(),
                domain_size,
            });
        }
        Ok(self.weights.iter().map(|&w| u128::from(w)).collect())
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}
