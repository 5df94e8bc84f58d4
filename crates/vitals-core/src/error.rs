//! Error types for vitals.

use thiserror::Error;

/// Core error type for all vitals operations.
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Probe {probe} failed: {message}")]
    Probe { probe: String, message: String },

    /// The model asked for a function outside the registry.
    #[error("no such func: {0}")]
    NoSuchFunc(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, VitalsError>;
