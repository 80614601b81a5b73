//! Shared test doubles for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sahayak::models::{GenerativeModel, ImageAttachment, ModelInvoker, ModelTier};
use sahayak::prompt::TierVocabulary;
use sahayak::{AssessmentService, Result, TriageError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PRIMARY: &str = "gemini-2.5-pro";
pub const SECONDARY: &str = "gemini-2.5-flash";

/// One recorded call to the fake model
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model_id: String,
    pub prompt: String,
    pub image_mime: Option<String>,
}

/// Model client that answers from a script and records every call
#[derive(Default)]
pub struct FakeModel {
    responses: HashMap<String, std::result::Result<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, model_id: &str, text: &str) -> Self {
        self.responses.insert(model_id.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, model_id: &str, message: &str) -> Self {
        self.responses.insert(model_id.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            model_id: model_id.to_string(),
            prompt: prompt.to_string(),
            image_mime: image.map(|i| i.mime_type.clone()),
        });

        match self.responses.get(model_id) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(TriageError::Upstream {
                model: model_id.to_string(),
                message: message.clone(),
            }),
            None => Err(TriageError::Upstream {
                model: model_id.to_string(),
                message: "404 model not found".to_string(),
            }),
        }
    }
}

pub fn primary_tier() -> ModelTier {
    ModelTier::new(PRIMARY, "Gemini 2.5 Pro (High Intel)")
}

pub fn secondary_tier() -> ModelTier {
    ModelTier::new(SECONDARY, "Gemini 2.5 Flash (Backup)")
}

/// Assessment service over the given fake
pub fn service(model: Arc<FakeModel>) -> AssessmentService {
    let invoker = ModelInvoker::new(model, primary_tier(), secondary_tier());
    AssessmentService::new(invoker, TierVocabulary::Yellow)
}
