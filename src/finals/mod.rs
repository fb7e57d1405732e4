//! Latest record per algorithm
//!
//! The simulator emits a time series of JSON records, each tagged with an
//! `algorithm` and a numeric `time`. [`finals`] keeps, for every algorithm,
//! the record with the greatest time. A later record only replaces the kept
//! one when its time is strictly greater, so ties keep the first record seen.
//! Output follows the order in which algorithms first appeared.

use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// One simulator record
///
/// Only `algorithm` and `time` are interpreted; every field, including
/// unknown ones, is written back in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    algorithm: String,
    time: Number,
    fields: Map<String, Value>,
}

impl Record {
    /// Wrap a JSON object, checking for `algorithm` and `time`
    pub fn from_object(fields: Map<String, Value>) -> Result<Self> {
        let algorithm = match fields.get("algorithm") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => anyhow::bail!("'algorithm' must be a string, got {}", other),
            None => anyhow::bail!("record has no 'algorithm' field"),
        };
        let time = match fields.get("time") {
            Some(Value::Number(n)) => n.clone(),
            Some(other) => anyhow::bail!("'time' must be a number, got {}", other),
            None => anyhow::bail!("record has no 'time' field"),
        };
        Ok(Self {
            algorithm,
            time,
            fields,
        })
    }

    /// Parse one NDJSON line
    pub fn parse(line: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(line)? {
            Value::Object(fields) => Self::from_object(fields),
            other => anyhow::bail!("record must be a JSON object, got {}", other),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn time(&self) -> &Number {
        &self.time
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// Compare two JSON numbers, exactly when both are integers
fn compare_time(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Running reduction to the latest record per algorithm
///
/// Holds one record per distinct algorithm, so memory does not grow with the
/// length of the input stream.
#[derive(Debug, Default)]
pub struct Finals {
    latest: Vec<Record>,
    index: HashMap<String, usize>,
}

impl Finals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in
    pub fn push(&mut self, record: Record) {
        match self.index.get(&record.algorithm) {
            Some(&slot) => {
                if compare_time(&self.latest[slot].time, &record.time) == Ordering::Less {
                    self.latest[slot] = record;
                }
            }
            None => {
                self.index.insert(record.algorithm.clone(), self.latest.len());
                self.latest.push(record);
            }
        }
    }

    /// Number of distinct algorithms seen so far
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Kept records, in first-seen algorithm order
    pub fn into_records(self) -> Vec<Record> {
        self.latest
    }
}

/// Latest record per algorithm, in first-seen algorithm order
pub fn finals<I>(records: I) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    let mut acc = Finals::new();
    for record in records {
        acc.push(record);
    }
    acc.into_records()
}

/// Read NDJSON records from `input` and write the finals to `output`
///
/// Records are folded as they are read. Blank lines are skipped; any other
/// unparsable line is fatal and nothing is written.
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<usize> {
    let mut acc = Finals::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read record stream")?;
        if line.trim().is_empty() {
            continue;
        }
        let record = Record::parse(&line)
            .with_context(|| format!("Invalid record on line {}", index + 1))?;
        acc.push(record);
    }

    let results = acc.into_records();
    for record in &results {
        writeln!(output, "{}", record.to_json())?;
    }
    output.flush()?;
    Ok(results.len())
}
