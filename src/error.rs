//! Error types for the fallible edges (config loading, asset preload)
//!
//! Per-tick simulation code never fails; only setup can.

use thiserror::Error;

/// Invalid or unreadable game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("planet spawn interval is inverted ({min} > {max})")]
    InvertedInterval { min: f32, max: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("gravity must be negative (y grows downward), got {0}")]
    Gravity(f32),
}

/// A required image resource failed to load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to load image: {0}")]
    Load(String),
    #[error("asset not preloaded: {0}")]
    Missing(String),
}
