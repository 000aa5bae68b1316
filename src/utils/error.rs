// ABOUTME: Centralized error handling for the crate
// Provides the selector/count error kinds and conversions for the loaders

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostError {
    #[error("Invalid API category '{given}'. Choose one of: {valid}")]
    InvalidCategory { given: String, valid: String },

    #[error("Invalid conversation type '{given}'. Choose one of: {valid}")]
    InvalidConversationType { given: String, valid: String },

    #[error("Invalid {field} count '{given}': must be a non-negative integer")]
    InvalidCount { field: &'static str, given: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CostError>;
