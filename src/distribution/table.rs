//! Inverse-CDF sampling table
//!
//! A weight vector is normalized by its total and accumulated into a list of
//! `(cumulative_probability, rank)` boundaries. Sampling takes a uniform draw
//! in `[0, 1)` and returns the first rank whose boundary reaches the draw.
//!
//! # Characteristics
//!
//! - Only ranks with strictly positive weight get a boundary; zero-weight
//!   ranks keep their index but are never returned
//! - Boundaries are strictly increasing and the last one is 1 within
//!   [`EPSILON`]
//! - Lookup is a linear scan, O(domain size) per draw. Domains here are tens
//!   of ranks, so no search structure is kept
//! - A draw above every boundary (floating-point rounding) returns the last
//!   rank instead of failing

use super::DistributionError;

/// Tolerance for "the last boundary is 1"
pub const EPSILON: f64 = 1e-9;

/// One cumulative boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// Probability mass of this rank and every rank before it
    pub cumulative: f64,
    pub rank: u64,
}

/// Cumulative boundary table for one weight vector
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryTable {
    boundaries: Vec<Boundary>,
}

impl BoundaryTable {
    /// Normalize and accumulate `weights` into a boundary table
    ///
    /// Fails if `weights` is empty or carries no positive weight.
    pub fn build(weights: &[u128]) -> Result<Self, DistributionError> {
        let relative: Vec<f64> = weights.iter().map(|&w| w as f64).collect();
        Self::from_relative(&relative)
    }

    /// Same as [`build`](Self::build), from float weights
    ///
    /// Non-positive and NaN weights are treated as zero.
    pub fn from_relative(weights: &[f64]) -> Result<Self, DistributionError> {
        if weights.is_empty() {
            return Err(DistributionError::EmptyDomain);
        }

        let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
        if !(total > 0.0) || !total.is_finite() {
            return Err(DistributionError::NoPositiveWeight);
        }

        let mut boundaries: Vec<Boundary> = Vec::with_capacity(weights.len());
        let mut cumulative = 0.0;
        for (rank, &weight) in weights.iter().enumerate() {
            if !(weight > 0.0) {
                continue;
            }
            cumulative += weight / total;

            // A rank whose mass is below f64 resolution at this point of the
            // running sum cannot be reached by any draw; keep the table
            // strictly increasing instead of emitting a duplicate boundary.
            if let Some(prev) = boundaries.last() {
                if cumulative <= prev.cumulative {
                    continue;
                }
            }
            boundaries.push(Boundary {
                cumulative,
                rank: rank as u64,
            });
        }

        Ok(Self { boundaries })
    }

    /// Map a uniform draw in `[0, 1)` to a rank
    ///
    /// Returns the lowest rank whose boundary is `>= draw`, or the last rank
    /// when rounding left the draw above every boundary.
    #[inline]
    pub fn sample(&self, draw: f64) -> u64 {
        for boundary in &self.boundaries {
            if draw <= boundary.cumulative {
                return boundary.rank;
            }
        }
        self.last_rank()
    }

    /// Highest rank with a boundary
    pub fn last_rank(&self) -> u64 {
        // build() never yields an empty table
        self.boundaries.last().map(|b| b.rank).unwrap_or(0)
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}
