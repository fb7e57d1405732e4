//! Geometric rank distribution
//!
//! Weight for rank `i` is `2^(domain_size - i)`: each higher rank carries half
//! the mass of the one below it. The `1 << domain_size` scale only keeps the
//! arithmetic integral; normalization removes it.
//!
//! The integer form is what the offline model receives, so it is bounded by
//! `u128`. Sampling uses `0.5^i` instead and accepts any domain size; ranks
//! past the f64 resolution of the cumulative table are simply never drawn.

use super::{check_domain, Distribution, DistributionError, WeightVector};

/// Largest domain whose top integer weight `1 << domain_size` fits in a `u128`
pub const GEOMETRIC_MAX_DOMAIN: usize = 127;

/// Power-of-two decay toward higher ranks
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricDistribution;

impl Distribution for GeometricDistribution {
    fn weights(&self, domain_size: usize) -> Result<WeightVector, DistributionError> {
        check_domain(domain_size)?;
        if domain_size > GEOMETRIC_MAX_DOMAIN {
            return Err(DistributionError::DomainTooLarge {
                family: self.name(),
                max: GEOMETRIC_MAX_DOMAIN,
                requested: domain_size,
            });
        }

        let max_weight = 1u128 << domain_size;
        Ok((0..domain_size).map(|i| max_weight >> i).collect())
    }

    fn relative_weights(&self, domain_size: usize) -> Result<Vec<f64>, DistributionError> {
        check_domain(domain_size)?;

        let mut weight = 1.0f64;
        let mut weights = Vec::with_capacity(domain_size);
        for _ in 0..domain_size {
            weights.push(weight);
            // Underflows to 0.0 past rank 1074, which drops the rank
            weight *= 0.5;
        }
        Ok(weights)
    }

    fn name(&self) -> &'static str {
        "geometric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::table::BoundaryTable;
    use crate::util::rng::{acquire_rng, RandomSource};

    #[test]
    fn test_geometric_weights() {
        assert_eq!(GeometricDistribution.weights(1).unwrap(), vec![2]);
        assert_eq!(GeometricDistribution.weights(3).unwrap(), vec![8, 4, 2]);
    }

    #[test]
    fn test_geometric_limits() {
        assert_eq!(
            GeometricDistribution.weights(0),
            Err(DistributionError::EmptyDomain)
        );

        let wide = GeometricDistribution.weights(64).unwrap();
        assert_eq!(wide[0], 1u128 << 64);
        assert_eq!(wide[63], 2);

        let top = GeometricDistribution.weights(GEOMETRIC_MAX_DOMAIN).unwrap();
        assert_eq!(top[0], 1u128 << 127);
        assert_eq!(*top.last().unwrap(), 2);

        assert!(matches!(
            GeometricDistribution.weights(128),
            Err(DistributionError::DomainTooLarge { requested: 128, .. })
        ));
    }

    #[test]
    fn test_sampling_weights_have_no_domain_cap() {
        assert_eq!(
            GeometricDistribution.relative_weights(0),
            Err(DistributionError::EmptyDomain)
        );

        for domain_size in [64, 128, 2000] {
            let weights = GeometricDistribution.relative_weights(domain_size).unwrap();
            assert_eq!(weights.len(), domain_size);
            assert_eq!(weights[1] / weights[0], 0.5);

            let table = BoundaryTable::from_relative(&weights).unwrap();
            assert_eq!(table.sample(0.0), 0);
            assert_eq!(table.sample(0.6), 1);
        }
    }

    #[test]
    fn test_geometric_halving_ratio() {
        let table = BoundaryTable::build(&GeometricDistribution.weights(3).unwrap()).unwrap();
        let mut rng = acquire_rng(Some(7));
        let mut buckets = [0u32; 3];

        for _ in 0..70_000 {
            buckets[table.sample(rng.draw()) as usize] += 1;
        }

        // Expected ratio 4:2:1
        let r01 = buckets[0] as f64 / buckets[1] as f64;
        let r12 = buckets[1] as f64 / buckets[2] as f64;
        assert!((r01 - 2.0).abs() < 0.15, "rank0/rank1 ratio {}", r01);
        assert!((r12 - 2.0).abs() < 0.15, "rank1/rank2 ratio {}", r12);
    }

    #[test]
    fn test_halving_ratio_beyond_64_ranks() {
        let weights = GeometricDistribution.relative_weights(70).unwrap();
        let table = BoundaryTable::from_relative(&weights).unwrap();
        let mut rng = acquire_rng(Some(7));
        let mut buckets = [0u32; 3];

        for _ in 0..80_000 {
            let rank = table.sample(rng.draw()) as usize;
            if rank < 3 {
                buckets[rank] += 1;
            }
        }

        let r01 = buckets[0] as f64 / buckets[1] as f64;
        let r12 = buckets[1] as f64 / buckets[2] as f64;
        assert!((r01 - 2.0).abs() < 0.15, "rank0/rank1 ratio {}", r01);
        assert!((r12 - 2.0).abs() < 0.2, "rank1/rank2 ratio {}", r12);
    }
}
