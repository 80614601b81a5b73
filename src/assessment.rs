//! Assessment service
//!
//! One request end to end: validate intake, compose the prompt, invoke the
//! model chain, strip fences, classify. No state survives the call.

use crate::cli::Config;
use crate::errors::Result;
use crate::intake::IntakeRecord;
use crate::models::{ApiKey, GeminiClient, ModelInvoker};
use crate::prompt::{self, TierVocabulary};
use crate::report::{classify, strip_code_fences, Severity};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a successful assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResult {
    /// Request identifier, also attached to log events
    pub id: Uuid,

    /// Model output with code fences removed
    pub report_html: String,

    /// Label of the tier that produced the report
    pub model_used: String,

    pub severity: Severity,

    /// Patient age, carried for the referral slip
    pub age: u32,
}

/// Runs assessments against a configured invoker
pub struct AssessmentService {
    invoker: ModelInvoker,
    vocabulary: TierVocabulary,
}

impl AssessmentService {
    pub fn new(invoker: ModelInvoker, vocabulary: TierVocabulary) -> Self {
        Self {
            invoker,
            vocabulary,
        }
    }

    /// Wire the production client from configuration and the startup credential
    pub fn from_config(config: &Config, api_key: ApiKey) -> Result<Self> {
        let client = GeminiClient::with_config(
            &config.models.api_base,
            api_key,
            config.request_timeout(),
        )?;

        let invoker = ModelInvoker::new(
            Arc::new(client),
            config.models.primary.clone(),
            config.models.secondary.clone(),
        );

        Ok(Self::new(invoker, config.models.vocabulary))
    }

    pub fn invoker(&self) -> &ModelInvoker {
        &self.invoker
    }

    /// Assess one intake record
    ///
    /// Validation errors return before the model client is touched.
    pub async fn assess(&self, record: &IntakeRecord) -> Result<AssessmentResult> {
        let id = Uuid::new_v4();

        if let Err(e) = record.validate() {
            tracing::info!(request = %id, reason = %e, "intake rejected");
            return Err(e);
        }

        tracing::info!(
            request = %id,
            role = %record.role,
            language = %record.language,
            has_image = record.image.is_some(),
            "running assessment"
        );

        let prompt = prompt::compose(record, self.vocabulary);
        let generation = self.invoker.invoke(&prompt, record.image.as_ref()).await?;

        let report_html = strip_code_fences(&generation.text);
        let severity = classify(&report_html);

        tracing::info!(
            request = %id,
            severity = severity.as_str(),
            model = %generation.tier.id,
            "assessment complete"
        );

        Ok(AssessmentResult {
            id,
            model_used: generation.model_label().to_string(),
            report_html,
            severity,
            age: record.age,
        })
    }
}
