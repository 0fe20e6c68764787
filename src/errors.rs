use serde::{Deserialize, Serialize};
use std::io::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrajError {
    ColumnNotFound(String),
    Value(String),
    Format(String),
    BracketNotFound(f64),
    MdNotIncreasing(f64, f64),
    DirNotFound(PathBuf),
    Terminal(String),
    Logic(String),
    Str(String),
    IO(String),
}

impl std::fmt::Display for TrajError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            TrajError::ColumnNotFound(column) => write!(f, "Column [{}] was not found", &column),
            TrajError::Value(msg) => write!(f, "Invalid numeric value: {}", msg),
            TrajError::Format(msg) => write!(f, "Invalid format: {}", msg),
            TrajError::BracketNotFound(md) => write!(
                f,
                "Measured depth [{}] is not enclosed by two adjacent survey stations",
                md
            ),
            TrajError::MdNotIncreasing(prev, md) => write!(
                f,
                "Measured depth must be strictly increasing [{} -> {}]",
                prev, md
            ),
            TrajError::DirNotFound(path_buf) => {
                write!(f, "Directory not found or does not exist: {:#?}", path_buf)
            }
            TrajError::Terminal(msg) => write!(f, "Terminal registered an error: {}", msg),
            TrajError::Logic(msg) => write!(f, "{}", msg),
            TrajError::Str(msg) => write!(f, "{}", msg),
            TrajError::IO(msg) => write!(f, "Input / output error: {}", msg),
        }
    }
}

impl std::convert::From<std::io::Error> for TrajError {
    fn from(e: Error) -> Self {
        Self::IO(e.to_string())
    }
}
