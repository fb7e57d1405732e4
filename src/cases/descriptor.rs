//! Case descriptor lines
//!
//! One benchmark case per line: `name:kind[:param,param,...]`. The baseline
//! kind takes no parameters; the static kind carries the bounds computed by
//! an offline model.

use std::fmt;
use std::str::FromStr;

/// Tag of the parameterless baseline policy
pub const BASELINE_TAG: &str = "pupd";

/// Tag of the bound-carrying policy
pub const STATIC_TAG: &str = "static";

/// Policy a case runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseKind {
    /// Fixed baseline, no parameters
    Baseline,
    /// Static bounds, one per queue
    Static { bounds: Vec<i64> },
}

impl CaseKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Baseline => BASELINE_TAG,
            Self::Static { .. } => STATIC_TAG,
        }
    }
}

/// A named benchmark case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDescriptor {
    pub name: String,
    pub kind: CaseKind,
}

impl CaseDescriptor {
    /// Baseline case for a `(queues, ranks)` pair
    pub fn baseline(queue_count: usize, rank_count: usize) -> Self {
        Self {
            name: format!("{}-{}", BASELINE_TAG, case_suffix(queue_count, rank_count)),
            kind: CaseKind::Baseline,
        }
    }

    /// Static case built from one offline model's bounds
    pub fn from_model(model: &str, queue_count: usize, rank_count: usize, bounds: Vec<i64>) -> Self {
        Self {
            name: format!(
                "{}-{}-{}",
                STATIC_TAG,
                model,
                case_suffix(queue_count, rank_count)
            ),
            kind: CaseKind::Static { bounds },
        }
    }
}

impl fmt::Display for CaseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind.tag())?;
        if let CaseKind::Static { bounds } = &self.kind {
            let joined = bounds
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(",");
            write!(f, ":{}", joined)?;
        }
        Ok(())
    }
}

impl FromStr for CaseDescriptor {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.splitn(3, ':');
        let name = parts.next().filter(|n| !n.is_empty());
        let tag = parts.next();
        let params = parts.next();

        let (name, tag) = match (name, tag) {
            (Some(name), Some(tag)) => (name.to_string(), tag),
            _ => anyhow::bail!("Invalid case descriptor: {}", line),
        };

        let kind = match (tag, params) {
            (BASELINE_TAG, None) => CaseKind::Baseline,
            (STATIC_TAG, Some(params)) => {
                let bounds = params
                    .split(',')
                    .map(|b| b.trim().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| anyhow::anyhow!("Invalid bounds in '{}': {}", line, e))?;
                CaseKind::Static { bounds }
            }
            _ => anyhow::bail!("Unknown case kind '{}' in: {}", tag, line),
        };

        Ok(Self { name, kind })
    }
}

/// `<k>q-<n>r`, shared by case names and file names
pub fn case_suffix(queue_count: usize, rank_count: usize) -> String {
    format!("{}q-{}r", queue_count, rank_count)
}
