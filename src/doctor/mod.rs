//! Doctor command for system diagnostics
//!
//! Checks the credential, the configuration and that both model tiers
//! resolve upstream before the server is put in front of operators.

use crate::cli::Config;
use crate::errors::Result;
use crate::models::{ApiKey, GeminiClient, ModelTier};
use colored::Colorize;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
    config_error: Option<String>,
    api_key: Result<ApiKey>,
}

impl Doctor {
    /// Create a new doctor instance
    ///
    /// A config that failed to load, or a missing key, becomes a failed
    /// check; the remaining checks run against built-in defaults.
    pub fn new(config: Result<Config>, api_key: Result<ApiKey>) -> Self {
        let (config, config_error) = match config {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e.to_string())),
        };

        Self {
            config,
            config_error,
            api_key,
        }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![
            self.check_config(),
            self.check_api_key(),
            self.check_tiers_distinct(),
        ];

        let models = &self.config.models;
        match self.client() {
            Some(Ok(client)) => {
                checks.push(check_model(&client, "Primary Model", &models.primary).await);
                checks.push(check_model(&client, "Secondary Model", &models.secondary).await);
            }
            Some(Err(e)) => checks.extend(unchecked_models(HealthStatus::Fail(format!(
                "client setup failed: {}",
                e
            )))),
            None => checks.extend(unchecked_models(HealthStatus::Warn(
                "skipped, no API key".to_string(),
            ))),
        }

        checks
    }

    /// `None` when there is no key to look models up with
    fn client(&self) -> Option<Result<GeminiClient>> {
        let key = self.api_key.as_ref().ok()?.clone();
        Some(GeminiClient::with_config(
            &self.config.models.api_base,
            key,
            self.config.request_timeout(),
        ))
    }

    /// Check 1: configuration values
    fn check_config(&self) -> HealthCheck {
        if let Some(message) = &self.config_error {
            return HealthCheck::new("Configuration", HealthStatus::Fail(message.clone()));
        }

        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 2: credential present
    fn check_api_key(&self) -> HealthCheck {
        match &self.api_key {
            Ok(_) => HealthCheck::new("API Key", HealthStatus::Pass),
            Err(e) => HealthCheck::new("API Key", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 3: fallback actually goes somewhere else
    fn check_tiers_distinct(&self) -> HealthCheck {
        if self.config.models.primary.id == self.config.models.secondary.id {
            HealthCheck::new(
                "Fallback Tier",
                HealthStatus::Warn("primary and secondary use the same model".to_string()),
            )
        } else {
            HealthCheck::new("Fallback Tier", HealthStatus::Pass)
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "Sahayak System Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };

            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

/// Model rows when no lookup can be made
fn unchecked_models(status: HealthStatus) -> [HealthCheck; 2] {
    [
        HealthCheck::new("Primary Model", status.clone()),
        HealthCheck::new("Secondary Model", status),
    ]
}

/// Checks 4-5: model identifier resolves upstream
async fn check_model(client: &GeminiClient, name: &str, tier: &ModelTier) -> HealthCheck {
    match client.model_exists(&tier.id).await {
        Ok(true) => HealthCheck::new(name, HealthStatus::Pass),
        Ok(false) => HealthCheck::new(
            name,
            HealthStatus::Fail(format!("model '{}' not found", tier.id)),
        ),
        Err(e) => HealthCheck::new(name, HealthStatus::Fail(e.to_string())),
    }
}
