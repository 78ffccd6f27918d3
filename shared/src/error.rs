//! Error handling for the Pour-Over Brew Dashboard
//!
//! Soft conditions (no water, unknown preset, invalid pours) are reported as
//! values elsewhere; these errors cover storage, configuration and rejected
//! preset saves.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Storage errors
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage read failed: {0}")]
    StorageRead(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Preset errors
    #[error("Built-in preset {0} cannot be modified")]
    ReadOnlyPreset(String),

    #[error("Invalid preset: {}", .errors.join("; "))]
    InvalidPreset { errors: Vec<String> },

    #[error("Preset name is required")]
    MissingPresetName,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

/// Result type alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;
