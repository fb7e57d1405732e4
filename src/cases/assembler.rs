//! Benchmark case assembly
//!
//! For every `(queue_count, rank_count)` pair of the plan, the assembler
//! builds the distribution's weight vector over `rank_count` ranks, asks the
//! bounds provider for offline model results, and writes
//! `bench_<k>q-<n>r.txt` holding the baseline case followed by one static
//! case per model.
//!
//! The provider is queried before the file is created, so a failing model
//! leaves no file behind for that pair. Files already written for earlier
//! pairs are kept; there is no rollback.

use super::descriptor::{case_suffix, CaseDescriptor};
use super::offline::{BoundsProvider, ModelBounds};
use crate::config::CasePlan;
use crate::distribution::Distribution;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes case files for a [`CasePlan`]
pub struct CaseAssembler<P> {
    plan: CasePlan,
    distribution: Box<dyn Distribution>,
    provider: P,
}

impl<P: BoundsProvider> CaseAssembler<P> {
    pub fn new(plan: CasePlan, provider: P) -> Self {
        let distribution = plan.distribution.family();
        Self {
            plan,
            distribution,
            provider,
        }
    }

    /// Generate every case file of the plan
    ///
    /// Stops at the first failure. Returns the paths written, in
    /// queue-major order.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.plan.out_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.plan.out_dir.display()
            )
        })?;

        let mut written = Vec::new();
        for &queue_count in &self.plan.queue_counts {
            for &rank_count in &self.plan.rank_counts {
                let path = self.assemble_pair(queue_count, rank_count).with_context(|| {
                    format!(
                        "Case generation failed for {} queues, {} ranks",
                        queue_count, rank_count
                    )
                })?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Query the model and write the case file for one pair
    pub fn assemble_pair(&self, queue_count: usize, rank_count: usize) -> Result<PathBuf> {
        let weights = self
            .distribution
            .weights(rank_count)
            .with_context(|| format!("Invalid {} domain", self.distribution.name()))?;

        let models = self.provider.compute(&weights, queue_count)?;
        tracing::debug!(
            queue_count,
            rank_count,
            models = models.len(),
            "offline model answered"
        );

        let cases = build_cases(queue_count, rank_count, models);
        let path = case_file_path(&self.plan.out_dir, queue_count, rank_count);
        write_cases(&path, &cases)?;
        Ok(path)
    }
}

/// Baseline case first, then one static case per model, in model order
pub fn build_cases(
    queue_count: usize,
    rank_count: usize,
    models: Vec<ModelBounds>,
) -> Vec<CaseDescriptor> {
    let mut cases = Vec::with_capacity(models.len() + 1);
    cases.push(CaseDescriptor::baseline(queue_count, rank_count));
    cases.extend(models.into_iter().map(|model| {
        CaseDescriptor::from_model(&model.name, queue_count, rank_count, model.bounds)
    }));
    cases
}

/// `<out_dir>/bench_<k>q-<n>r.txt`
pub fn case_file_path(out_dir: &Path, queue_count: usize, rank_count: usize) -> PathBuf {
    out_dir.join(format!("bench_{}.txt", case_suffix(queue_count, rank_count)))
}

fn write_cases(path: &Path, cases: &[CaseDescriptor]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create case file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for case in cases {
        writeln!(writer, "{}", case)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write case file: {}", path.display()))?;
    Ok(())
}
