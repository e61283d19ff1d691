//! Domain-specific error types for the planner.
//!
//! Internal modules return typed errors ([`ConfigError`], [`FactsError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! Error
//! ├── Config(ConfigError) — config loading, provider validation
//! └── Facts(FactsError)   — host fact detection
//! ```

use thiserror::Error;

/// Top-level error type for the planner.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error (parsing, I/O, provider validation).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host fact detection error.
    #[error("Facts error: {0}")]
    Facts(#[from] FactsError),
}

/// Errors that arise from configuration loading and policy evaluation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured install provider is neither `manual` nor a recognized
    /// installable provider.
    #[error("Unsupported provider '{0}': expected 'manual' or a recognized provider")]
    UnsupportedProvider(String),

    /// The config file contains a syntax or type error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from host fact detection.
#[derive(Error, Debug)]
pub enum FactsError {
    /// The OS family could not be determined.
    #[error("OS family detection failed: {0}")]
    DetectionFailed(String),
}
