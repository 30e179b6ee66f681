//! Error types for the tracker
//!
//! The widget itself has no failure modes: a pointer channel that never
//! dispatches simply leaves the coordinate at its default. Errors only arise
//! at the outer edges (feeds, surfaces, configuration).

use thiserror::Error;

/// Errors that can occur around a mounted tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Feed already running: {0}")]
    AlreadyRunning(String),
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
