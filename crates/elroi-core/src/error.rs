// File: crates/elroi-core/src/error.rs
// Summary: Error type for the fallible edges of the core (parsing input, colors).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElroiError {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("unknown series type {0:?}")]
    UnknownSeriesType(String),
}

pub type Result<T> = std::result::Result<T, ElroiError>;
