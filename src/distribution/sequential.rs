//! Sequential rank patterns
//!
//! Deterministic, cyclic rank streams driven by a cursor. Neither pattern
//! uses the random source.
//!
//! - [`Sawtooth`]: `0, 1, ..., max_rank, 0, 1, ...`
//! - [`Triangle`]: sweeps up and down; each turning point is emitted twice so
//!   the endpoints are not under-represented next to interior ranks

use crate::generator::{Emission, RankSource};

/// Ramp that wraps to 0 after `max_rank`
#[derive(Debug, Clone)]
pub struct Sawtooth {
    max_rank: u64,
    /// Next rank to emit
    head: u64,
}

impl Sawtooth {
    pub fn new(max_rank: u64) -> Self {
        Self { max_rank, head: 0 }
    }
}

impl RankSource for Sawtooth {
    fn next_emission(&mut self) -> Emission {
        let rank = self.head;
        self.head = if self.head >= self.max_rank { 0 } else { self.head + 1 };
        Emission::Single(rank)
    }
}

/// Sweep direction of a [`Triangle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Up-and-down sweep between 0 and `max_rank`
///
/// Each step emits the current head and moves it one rank. When the move
/// lands on 0 or `max_rank`, the new head is emitted as well in the same step
/// and the direction flips. With `max_rank = 2` the stream is
/// `0, 1, 2, 2, 1, 0, 0, 1, 2, 2, ...`.
#[derive(Debug, Clone)]
pub struct Triangle {
    max_rank: u64,
    head: u64,
    direction: Direction,
}

impl Triangle {
    pub fn new(max_rank: u64) -> Self {
        Self {
            max_rank,
            head: 0,
            direction: Direction::Up,
        }
    }
}

impl RankSource for Triangle {
    fn next_emission(&mut self) -> Emission {
        // One-rank domain: nowhere to sweep
        if self.max_rank == 0 {
            return Emission::Single(0);
        }

        let rank = self.head;
        self.head = match self.direction {
            Direction::Up => self.head + 1,
            Direction::Down => self.head - 1,
        };

        if self.head == self.max_rank || self.head == 0 {
            self.direction = self.direction.flip();
            Emission::Double(rank, self.head)
        } else {
            Emission::Single(rank)
        }
    }
}
