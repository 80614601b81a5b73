//! Error types for Sahayak
//!
//! One error enum covers the whole assessment flow: configuration problems
//! are fatal at startup, intake problems are rejected before any network
//! call, and upstream failures are either recovered by the fallback tier or
//! surfaced with the upstream text intact.

use thiserror::Error;

/// Main error type for the triage system
#[derive(Error, Debug)]
pub enum TriageError {
    /// Consent checkbox was not ticked
    #[error("Compliance Error: You must certify patient consent to proceed.")]
    MissingConsent,

    /// Neither symptom text nor an image was supplied
    #[error("Input Error: Please provide symptoms or an image.")]
    MissingEvidence,

    /// Patient age outside the accepted range
    #[error("Input Error: patient age {age} is outside 0-{max}")]
    AgeOutOfRange { age: u32, max: u32 },

    /// Uploaded file is not an accepted image type
    #[error("Input Error: unsupported image type '{0}' (expected JPEG or PNG)")]
    UnsupportedImage(String),

    /// Unknown value for an enumerated intake field
    #[error("Input Error: unknown {field} '{value}'")]
    InvalidField { field: &'static str, value: String },

    /// Form submission could not be read
    #[error("Malformed form submission: {0}")]
    MalformedRequest(String),

    /// Request body exceeded the configured upload limit
    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    /// A single model tier failed
    #[error("Model '{model}' failed: {message}")]
    Upstream { model: String, message: String },

    /// Both model tiers failed; carries the secondary tier's error text
    #[error("Server Busy or Key Error: {0}")]
    ModelUnavailable(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TriageError {
    /// True for errors caused by the submitted intake rather than the system
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TriageError::MissingConsent
                | TriageError::MissingEvidence
                | TriageError::AgeOutOfRange { .. }
                | TriageError::UnsupportedImage(_)
                | TriageError::InvalidField { .. }
        )
    }
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;
