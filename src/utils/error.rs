// src/utils/error.rs
use thiserror::Error;

// Absence of a species name, section or gender block is modeled with
// Option / empty maps, never with these error types.

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to compile pattern for label '{0}': {1}")]
    LabelPattern(String, regex::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
