//! Benchmark case generation
//!
//! Combines distribution weights with bounds from an offline model into case
//! descriptor files for the downstream simulator.

pub mod assembler;
pub mod descriptor;
pub mod offline;

pub use assembler::CaseAssembler;
pub use descriptor::{CaseDescriptor, CaseKind};
pub use offline::{BoundsProvider, ModelBounds, ModelError, OfflineModel};
