//! Patient intake
//!
//! An `IntakeRecord` lives for one assessment and is dropped afterwards.
//! `validate` runs before any network call.

pub mod types;

pub use types::{Gender, OperatorRole, OutputLanguage, Vitals, DEFAULT_AGE, MAX_AGE};

use crate::errors::{Result, TriageError};
use crate::models::ImageAttachment;

/// Image MIME types the uploader accepts
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Everything the operator entered for one patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRecord {
    pub role: OperatorRole,
    pub age: u32,
    pub gender: Gender,
    pub vitals: Vitals,
    pub symptoms: String,
    pub image: Option<ImageAttachment>,
    pub language: OutputLanguage,
    pub consent_given: bool,
}

impl Default for IntakeRecord {
    fn default() -> Self {
        Self {
            role: OperatorRole::default(),
            age: DEFAULT_AGE,
            gender: Gender::default(),
            vitals: Vitals::default(),
            symptoms: String::new(),
            image: None,
            language: OutputLanguage::default(),
            consent_given: false,
        }
    }
}

impl IntakeRecord {
    /// True when there is symptom text or an image to assess
    pub fn has_evidence(&self) -> bool {
        !self.symptoms.trim().is_empty() || self.image.is_some()
    }

    /// Reject the record before it reaches the model
    ///
    /// Consent is checked first, then evidence, matching the order the
    /// operator sees the messages in.
    pub fn validate(&self) -> Result<()> {
        if !self.consent_given {
            return Err(TriageError::MissingConsent);
        }

        if !self.has_evidence() {
            return Err(TriageError::MissingEvidence);
        }

        if self.age > MAX_AGE {
            return Err(TriageError::AgeOutOfRange {
                age: self.age,
                max: MAX_AGE,
            });
        }

        if let Some(image) = &self.image {
            validate_image_type(&image.mime_type)?;
        }

        Ok(())
    }
}

/// Check a MIME type against the accepted list
pub fn validate_image_type(mime_type: &str) -> Result<()> {
    let normalized = mime_type.trim().to_ascii_lowercase();
    if normalized == "image/jpg" || ACCEPTED_IMAGE_TYPES.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(TriageError::UnsupportedImage(mime_type.to_string()))
    }
}

/// Guess a MIME type from a file name, for the CLI `--image` flag
pub fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
