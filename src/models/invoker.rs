//! Two-tier model invoker
//!
//! Tries the primary tier once. Any error drops to the secondary tier,
//! which is also tried once. There is no backoff and no further retry: if
//! the secondary tier fails too, its error text is surfaced unchanged.

use crate::errors::{Result, TriageError};
use crate::models::client::GenerativeModel;
use crate::models::types::{Generation, ImageAttachment, ModelTier};
use std::sync::Arc;
use std::time::Instant;

/// Primary/secondary fallback chain over one model client
pub struct ModelInvoker {
    client: Arc<dyn GenerativeModel>,
    primary: ModelTier,
    secondary: ModelTier,
}

impl ModelInvoker {
    pub fn new(client: Arc<dyn GenerativeModel>, primary: ModelTier, secondary: ModelTier) -> Self {
        Self {
            client,
            primary,
            secondary,
        }
    }

    pub fn primary(&self) -> &ModelTier {
        &self.primary
    }

    pub fn secondary(&self) -> &ModelTier {
        &self.secondary
    }

    /// Generate text, falling back to the secondary tier once on failure
    pub async fn invoke(&self, prompt: &str, image: Option<&ImageAttachment>) -> Result<Generation> {
        match self.attempt(&self.primary, prompt, image).await {
            Ok(generation) => Ok(generation),
            Err(primary_err) => {
                tracing::warn!(
                    model = %self.primary.id,
                    error = %primary_err,
                    "primary model failed, falling back to {}",
                    self.secondary.id
                );

                self.attempt(&self.secondary, prompt, image)
                    .await
                    .map_err(|secondary_err| {
                        tracing::error!(
                            model = %self.secondary.id,
                            error = %secondary_err,
                            "secondary model failed"
                        );
                        TriageError::ModelUnavailable(upstream_text(secondary_err))
                    })
            }
        }
    }

    async fn attempt(
        &self,
        tier: &ModelTier,
        prompt: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Generation> {
        let started = Instant::now();
        let text = self.client.generate(&tier.id, prompt, image).await?;

        tracing::info!(
            model = %tier.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "model responded"
        );

        Ok(Generation {
            text,
            tier: tier.clone(),
        })
    }
}

/// Strip our own wrapping so the caller sees the upstream message as sent
fn upstream_text(err: TriageError) -> String {
    match err {
        TriageError::Upstream { message, .. } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Outcome = (&'static str, std::result::Result<&'static str, &'static str>);

    /// Returns the scripted outcome per model id and records every call
    struct ScriptedModel {
        outcomes: Vec<Outcome>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(outcomes: Vec<Outcome>) -> Arc<Self> {
            Arc::new(Self {
                outcomes,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(
            &self,
            model_id: &str,
            _prompt: &str,
            _image: Option<&ImageAttachment>,
        ) -> Result<String> {
            self.calls.lock().unwrap().push(model_id.to_string());
            let (_, outcome) = self
                .outcomes
                .iter()
                .find(|(id, _)| *id == model_id)
                .expect("unscripted model");
            outcome.map(str::to_string).map_err(|message| TriageError::Upstream {
                model: model_id.to_string(),
                message: message.to_string(),
            })
        }
    }

    fn invoker(model: Arc<ScriptedModel>) -> ModelInvoker {
        ModelInvoker::new(
            model,
            ModelTier::new("pro", "Pro (High Intel)"),
            ModelTier::new("flash", "Flash (Backup)"),
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let model = ScriptedModel::new(vec![("pro", Ok("RED")), ("flash", Ok("GREEN"))]);
        let generation = invoker(model.clone()).invoke("p", None).await.unwrap();

        assert_eq!(generation.text, "RED");
        assert_eq!(generation.model_label(), "Pro (High Intel)");
        assert_eq!(model.calls(), vec!["pro"]);
    }

    #[tokio::test]
    async fn test_fallback_to_secondary() {
        let model = ScriptedModel::new(vec![
            ("pro", Err("404 model not found")),
            ("flash", Ok("GREEN")),
        ]);
        let generation = invoker(model.clone()).invoke("p", None).await.unwrap();

        assert_eq!(generation.text, "GREEN");
        assert_eq!(generation.tier.id, "flash");
        assert_eq!(generation.model_label(), "Flash (Backup)");
        assert_eq!(model.calls(), vec!["pro", "flash"]);
    }

    #[tokio::test]
    async fn test_both_fail_surfaces_secondary_text() {
        let model = ScriptedModel::new(vec![
            ("pro", Err("primary quota")),
            ("flash", Err("HTTP 429 RESOURCE_EXHAUSTED: Quota exceeded")),
        ]);
        let err = invoker(model.clone()).invoke("p", None).await.unwrap_err();

        match &err {
            TriageError::ModelUnavailable(message) => {
                assert_eq!(message, "HTTP 429 RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("HTTP 429 RESOURCE_EXHAUSTED: Quota exceeded"));
        assert_eq!(model.calls(), vec!["pro", "flash"]);
    }

    #[tokio::test]
    async fn test_non_ascii_report_passes_through() {
        let report = "स्थिति: हरा (GREEN)";
        let model = ScriptedModel::new(vec![("pro", Ok(report)), ("flash", Ok("unused"))]);
        let generation = invoker(model).invoke("p", None).await.unwrap();

        assert_eq!(generation.text, report);
        assert!(generation.text.chars().count() < generation.text.len());
    }

    #[tokio::test]
    async fn test_fallback_over_http() {
        let base = crate::models::stub::spawn().await;
        let client = crate::models::GeminiClient::with_config(
            &base,
            crate::models::ApiKey::new(crate::models::stub::STUB_KEY).unwrap(),
            std::time::Duration::from_secs(5),
        )
        .unwrap();
        let invoker = ModelInvoker::new(
            Arc::new(client),
            ModelTier::new("busy-model", "Busy"),
            ModelTier::new("echo-model", "Echo"),
        );

        let generation = invoker.invoke("p", None).await.unwrap();
        assert_eq!(generation.text, "parts=1 mime=none");
        assert_eq!(generation.model_label(), "Echo");
    }

    #[test]
    fn test_upstream_text_passthrough() {
        let err = TriageError::ConfigError("bad".to_string());
        assert_eq!(upstream_text(err), "Configuration error: bad");
    }
}
