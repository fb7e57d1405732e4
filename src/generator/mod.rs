//! Rank stream generation
//!
//! A [`RankSource`] yields ranks one step at a time. Most sources emit a
//! single rank per step; the triangle pattern emits its turning points twice.
//! [`generate`] drives any source until the requested packet count is reached
//! and writes one rank per line.
//!
//! # Counting
//!
//! The packet counter advances by the number of ranks a step emitted and is
//! checked after each step. A doubled step can therefore overshoot the
//! requested count by one; this matches the triangle pattern's definition.
//!
//! # Example
//!
//! ```
//! use rankgen::distribution::sequential::Sawtooth;
//! use rankgen::generator::generate;
//!
//! let mut out = Vec::new();
//! generate(&mut Sawtooth::new(3), 5, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "0\n1\n2\n3\n0\n");
//! ```

use crate::distribution::table::BoundaryTable;
use crate::distribution::{Distribution, DistributionError};
use crate::util::rng::RandomSource;
use std::io::{self, Write};

/// Ranks produced by one generator step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Single(u64),
    /// The same step emits two ranks, in order
    Double(u64, u64),
}

impl Emission {
    /// Number of ranks emitted
    pub fn count(&self) -> u64 {
        match self {
            Self::Single(_) => 1,
            Self::Double(_, _) => 2,
        }
    }
}

/// A stateful producer of ranks
pub trait RankSource {
    /// Advance one step
    fn next_emission(&mut self) -> Emission;
}

/// Random ranks drawn from a boundary table
#[derive(Debug, Clone)]
pub struct SampledRanks<R> {
    table: BoundaryTable,
    rng: R,
}

impl<R: RandomSource> SampledRanks<R> {
    pub fn new(table: BoundaryTable, rng: R) -> Self {
        Self { table, rng }
    }

    /// Build a sampler for `distribution` over `[0, domain_size)`
    pub fn from_distribution(
        distribution: &dyn Distribution,
        domain_size: usize,
        rng: R,
    ) -> Result<Self, DistributionError> {
        let weights = distribution.relative_weights(domain_size)?;
        let table = BoundaryTable::from_relative(&weights)?;
        tracing::debug!(
            distribution = distribution.name(),
            domain_size,
            boundaries = table.len(),
            "built boundary table"
        );
        Ok(Self::new(table, rng))
    }
}

impl<R: RandomSource> RankSource for SampledRanks<R> {
    #[inline]
    fn next_emission(&mut self) -> Emission {
        Emission::Single(self.table.sample(self.rng.draw()))
    }
}

/// Write ranks from `source` to `out`, one per line, until at least
/// `packet_count` ranks have been emitted
///
/// Returns the number of ranks written.
pub fn generate<S, W>(source: &mut S, packet_count: u64, out: &mut W) -> io::Result<u64>
where
    S: RankSource + ?Sized,
    W: Write + ?Sized,
{
    let mut generated = 0u64;
    while generated < packet_count {
        let emission = source.next_emission();
        match emission {
            Emission::Single(rank) => writeln!(out, "{}", rank)?,
            Emission::Double(first, second) => {
                writeln!(out, "{}", first)?;
                writeln!(out, "{}", second)?;
            }
        }
        generated += emission.count();
    }
    out.flush()?;
    Ok(generated)
}

/// Collect ranks instead of writing them
#[cfg(test)]
pub(crate) fn collect<S: RankSource + ?Sized>(source: &mut S, packet_count: u64) -> Vec<u64> {
    let mut ranks = Vec::new();
    while (ranks.len() as u64) < packet_count {
        match source.next_emission() {
            Emission::Single(rank) => ranks.push(rank),
            Emission::Double(first, second) => {
                ranks.push(first);
                ranks.push(second);
            }
        }
    }
    ranks
}
