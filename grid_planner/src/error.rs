//! Error types for grid_planner

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building maps, loading configuration or encoding results.
///
/// A search that finds no route is not an error; it yields an empty path.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("failed to read map file {path}: {source}")]
    MapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed map: {0}")]
    MalformedMap(String),

    #[error("invalid map parameters: {0}")]
    InvalidMap(String),

    #[error("invalid collision radius {0} (must be finite, non-negative and fit on the grid)")]
    InvalidCollisionRadius(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown planning algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("a {width}x{height} map at {scale} pixels per cell is too large to render")]
    ImageTooLarge {
        width: usize,
        height: usize,
        scale: u32,
    },

    #[error("failed to encode plan: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<yaml_rust::ScanError> for PlannerError {
    fn from(e: yaml_rust::ScanError) -> Self {
        PlannerError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
