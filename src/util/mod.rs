//! Shared utilities

pub mod rng;
