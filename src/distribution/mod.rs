//! Rank distributions
//!
//! This module turns a distribution description into something that can
//! produce ranks. Random families are described by a weight vector over the
//! rank domain `[0, max_rank]`; the weights are normalized into a cumulative
//! [`table::BoundaryTable`] and sampled by inverse transform. Sequential
//! patterns (sawtooth, triangle) are deterministic and never touch the RNG.
//!
//! # Families
//!
//! - **Uniform**: every rank weighs 1
//! - **Weighted**: caller-supplied integer weights, zeros allowed
//! - **Geometric**: weight halves with each higher rank
//!
//! # Example
//!
//! ```
//! use rankgen::distribution::{Distribution, geometric::GeometricDistribution};
//! use rankgen::distribution::table::BoundaryTable;
//!
//! let weights = GeometricDistribution.weights(3).unwrap();
//! assert_eq!(weights, vec![8, 4, 2]);
//!
//! let table = BoundaryTable::build(&weights).unwrap();
//! assert_eq!(table.sample(0.0), 0);
//! assert_eq!(table.sample(0.99), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod geometric;
pub mod sequential;
pub mod table;
pub mod uniform;
pub mod weighted;

/// One non-negative weight per rank, index = rank
///
/// Weights need not sum to anything in particular; only ratios matter.
/// Stored as `u128` so geometric weights stay exact integers up to
/// [`geometric::GEOMETRIC_MAX_DOMAIN`] ranks.
pub type WeightVector = Vec<u128>;

/// Errors raised while building weight vectors or boundary tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("rank domain must contain at least one rank")]
    EmptyDomain,

    #[error("{family} distribution supports at most {max} ranks, got {requested}")]
    DomainTooLarge {
        family: &'static str,
        max: usize,
        requested: usize,
    },

    #[error("weight list has {weights} entries but the domain has {domain_size} ranks")]
    DomainMismatch { weights: usize, domain_size: usize },

    #[error("at least one weight must be positive")]
    NoPositiveWeight,
}

/// A weight family over a rank domain
///
/// Implementations are pure: the same domain size always yields the same
/// weight vector.
pub trait Distribution {
    /// Weight vector for ranks `[0, domain_size)`
    ///
    /// `domain_size` is `max_rank + 1` and must be at least 1.
    fn weights(&self, domain_size: usize) -> Result<WeightVector, DistributionError>;

    /// Relative weights as floats, for sampling
    ///
    /// Defaults to the integer weights. Families whose integer form is
    /// bounded override this to serve any domain size.
    fn relative_weights(&self, domain_size: usize) -> Result<Vec<f64>, DistributionError> {
        Ok(self.weights(domain_size)?.iter().map(|&w| w as f64).collect())
    }

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Serializable selector for a weight family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Uniform,
    Geometric,
    Weighted { weights: Vec<u64> },
}

impl DistributionKind {
    /// Instantiate the family this kind names
    pub fn family(&self) -> Box<dyn Distribution> {
        match self {
            Self::Uniform => Box::new(uniform::UniformDistribution),
            Self::Geometric => Box::new(geometric::GeometricDistribution),
            Self::Weighted { weights } => {
                Box::new(weighted::WeightedDistribution::new(weights.clone()))
            }
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Geometric => write!(f, "geometric"),
            Self::Weighted { weights } => write!(f, "weighted({})", join_weights(weights.as_slice())),
        }
    }
}

/// Serialize weights as a comma-joined decimal list
pub fn join_weights<W: fmt::Display>(weights: &[W]) -> String {
    weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn check_domain(domain_size: usize) -> Result<(), DistributionError> {
    if domain_size == 0 {
        return Err(DistributionError::EmptyDomain);
    }
    Ok(())
}
