use crate::records::{ActionKind, Position};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Parse Error (line {line}): {message}")]
    Parse { line: u64, message: String },

    #[error("Unknown defect '{name}' referenced by a selection event")]
    UnknownDefect { name: String },

    #[error("{action} at {position} has no matching active selection")]
    NotFound {
        action: ActionKind,
        position: Position,
    },
}

impl ScoreError {
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        ScoreError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type DsResult<T> = Result<T, ScoreError>;
