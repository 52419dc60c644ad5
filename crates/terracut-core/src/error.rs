//! Error types for terracut.
//!
//! ## Table of Contents
//! - **Error**: every failure mode of the selection-to-mesh pipeline
//! - **Result**: Type alias for `Result<T, Error>`

use thiserror::Error;

/// Result type alias for terracut operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for terracut operations
#[derive(Error, Debug)]
pub enum Error {
    /// A screen point does not intersect the reference surface
    #[error("screen point does not map to a geographic coordinate")]
    ProjectionFailed,

    /// Export or commit requested without a selected rectangle
    #[error("no active selection")]
    NoActiveSelection,

    /// The batch elevation query failed as a whole
    #[error("terrain query failed: {0}")]
    TerrainQueryFailed(String),

    /// Grid dimensions below the 2x2 minimum
    #[error("invalid grid dimensions {columns}x{rows}: both must be at least 2")]
    InvalidGridDimensions { columns: usize, rows: usize },

    /// Sample count does not match the grid it claims to cover
    #[error("expected {expected} points, got {actual}")]
    PointCountMismatch { expected: usize, actual: usize },

    /// An export is already waiting on terrain
    #[error("terrain query already in progress")]
    ExportInProgress,

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Terrain tile could not be loaded
    #[error("terrain error: {0}")]
    Terrain(String),

    /// Generic IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (should not occur in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a terrain query failure
    pub fn terrain_query(msg: impl Into<String>) -> Self {
        Self::TerrainQueryFailed(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terrain tile error
    pub fn terrain(msg: impl Into<String>) -> Self {
        Self::Terrain(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
