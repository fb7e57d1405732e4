//! rankgen - synthetic inputs for packet-ranking simulations
//!
//! rankgen produces rank streams and benchmark case descriptors for a
//! downstream packet-ranking simulator.
//!
//! # Architecture
//!
//! - **Random sources**: uniform, weighted and geometric weight families
//!   sampled through an inverse-CDF boundary table
//! - **Sequential patterns**: sawtooth and triangle sweeps, no randomness
//! - **Reproducible runs**: every generator owns a seedable RNG (`RNG_SEED`)
//! - **Case generation**: queue/rank sweeps parameterized by an external
//!   offline model
//! - **Finals**: latest simulator record per algorithm

pub mod cases;
pub mod config;
pub mod distribution;
pub mod finals;
pub mod generator;
pub mod util;

// Re-export commonly used types
pub use distribution::{Distribution, DistributionKind};
pub use generator::{generate, RankSource};

/// Result type used throughout rankgen
pub type Result<T> = anyhow::Result<T>;
