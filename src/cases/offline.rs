//! Offline model bounds
//!
//! Bounds for static cases come from an external model binary. It is invoked
//! as `<model> <w0,w1,...> <queue_count>`, must exit 0, and prints one JSON
//! object per line:
//!
//! ```text
//! {"name": "greedy", "bounds": [3, 9]}
//! ```
//!
//! Any non-zero exit or malformed line is fatal. The process is deterministic,
//! so nothing is retried.

use crate::distribution::join_weights;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Default location of the model binary, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "./offline-model/offline-model";

/// Bounds one model computed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelBounds {
    pub name: String,
    pub bounds: Vec<i64>,
}

/// Errors from querying an offline model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to run offline model {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("offline model exited with {status}\nstdout: {stdout}\nstderr: {stderr}")]
    Failed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("offline model output is not UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("malformed offline model output on line {line}: {text}")]
    Malformed {
        line: usize,
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of offline model bounds
///
/// `compute` returns one entry per model, in the order the models were
/// reported. A name reported twice keeps its first position and the later
/// bounds.
pub trait BoundsProvider {
    fn compute(&self, weights: &[u128], queue_count: usize) -> Result<Vec<ModelBounds>, ModelError>;
}

/// Runs the model binary as a subprocess
#[derive(Debug, Clone)]
pub struct OfflineModel {
    path: PathBuf,
}

impl OfflineModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BoundsProvider for OfflineModel {
    fn compute(&self, weights: &[u128], queue_count: usize) -> Result<Vec<ModelBounds>, ModelError> {
        let weight_arg = join_weights(weights);
        tracing::debug!(
            model = %self.path.display(),
            weights = %weight_arg,
            queue_count,
            "querying offline model"
        );

        // Blocks until the model exits; there is no timeout
        let output = Command::new(&self.path)
            .arg(&weight_arg)
            .arg(queue_count.to_string())
            .output()
            .map_err(|source| ModelError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ModelError::Failed {
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        parse_model_output(&stdout)
    }
}

/// Parse the model's line-delimited JSON output
pub fn parse_model_output(stdout: &str) -> Result<Vec<ModelBounds>, ModelError> {
    let mut models: Vec<ModelBounds> = Vec::new();

    for (index, text) in stdout.lines().enumerate() {
        let model: ModelBounds =
            serde_json::from_str(text).map_err(|source| ModelError::Malformed {
                line: index + 1,
                text: text.to_string(),
                source,
            })?;

        match models.iter_mut().find(|m| m.name == model.name) {
            Some(existing) => existing.bounds = model.bounds,
            None => models.push(model),
        }
    }

    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_output() {
        let out = "{\"name\": \"a\", \"bounds\": [1, 2]}\n{\"name\": \"b\", \"bounds\": []}\n";
        let models = parse_model_output(out).unwrap();
        assert_eq!(
            models,
            vec![
                ModelBounds { name: "a".into(), bounds: vec![1, 2] },
                ModelBounds { name: "b".into(), bounds: vec![] },
            ]
        );
    }

    #[test]
    fn test_parse_duplicate_name_keeps_position() {
        let out = "{\"name\":\"a\",\"bounds\":[1]}\n{\"name\":\"b\",\"bounds\":[2]}\n{\"name\":\"a\",\"bounds\":[3]}";
        let models = parse_model_output(out).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0], ModelBounds { name: "a".into(), bounds: vec![3] });
        assert_eq!(models[1].name, "b");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_model_output("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_is_fatal() {
        let err = parse_model_output("{\"name\":\"a\",\"bounds\":[1]}\nnot json\n").unwrap_err();
        assert!(matches!(err, ModelError::Malformed { line: 2, .. }), "{}", err);

        let err = parse_model_output("{\"name\":\"a\"}").unwrap_err();
        assert!(matches!(err, ModelError::Malformed { line: 1, .. }));

        let err = parse_model_output("{\"name\":\"a\",\"bounds\":[\"x\"]}").unwrap_err();
        assert!(matches!(err, ModelError::Malformed { .. }));
    }

    #[test]
    fn test_missing_binary_fails_to_spawn() {
        let model = OfflineModel::new("/nonexistent/offline-model");
        let err = model.compute(&[1, 1], 2).unwrap_err();
        assert!(matches!(err, ModelError::Spawn { .. }));
    }

    #[cfg(unix)]
    mod subprocess {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn stub(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("offline-model");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_stub_receives_positional_args() {
            let dir = TempDir::new().unwrap();
            let path = stub(
                &dir,
                r#"echo "{\"name\": \"echo\", \"bounds\": [$2]}"
echo "{\"name\": \"weights\", \"bounds\": [$1]}""#,
            );

            let models = OfflineModel::new(path).compute(&[8, 4, 2], 3).unwrap();
            assert_eq!(models[0], ModelBounds { name: "echo".into(), bounds: vec![3] });
            assert_eq!(models[1], ModelBounds { name: "weights".into(), bounds: vec![8, 4, 2] });
        }

        #[test]
        fn test_stub_nonzero_exit() {
            let dir = TempDir::new().unwrap();
            let path = stub(&dir, "echo partial; echo oops >&2; exit 3");

            let err = OfflineModel::new(path).compute(&[1], 2).unwrap_err();
            match err {
                ModelError::Failed { status, stdout, stderr } => {
                    assert_eq!(status.code(), Some(3));
                    assert_eq!(stdout.trim(), "partial");
                    assert_eq!(stderr.trim(), "oops");
                }
                other => panic!("unexpected error: {}", other),
            }
        }
    }
}
