use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataprepError>;

/// Errors that abort a run. Per-item problems are reported through
/// [`crate::types::SkipReason`] instead.
#[derive(Debug, Error)]
pub enum DataprepError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("image file name is not a numeric COCO id: {file_name}")]
    InvalidImageName { file_name: String },
    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("no source video found under {dir}")]
    NoSourceVideo { dir: PathBuf },
}

impl DataprepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
