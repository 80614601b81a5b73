//! Sahayak - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sahayak::{
    cli::{Args, AssessArgs, Commands, Config},
    doctor::Doctor,
    models::ApiKey,
    report::render_report_text,
    server::{self, AppState},
    telemetry, AssessmentService, TriageError,
};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();
    telemetry::init(verbosity);
    tracing::debug!(verbosity = verbosity.as_str(), "starting");

    let loaded = Config::load(args.config.clone());

    match &args.command {
        Commands::Serve { host, port } => {
            run_server(require_config(loaded)?, host.clone(), *port).await?
        }
        Commands::Assess(assess) => {
            run_assessment(require_config(loaded)?, assess, verbosity.show_progress()).await?
        }
        Commands::Doctor => run_doctor(loaded).await?,
        Commands::Config => show_config(&require_config(loaded)?, args.config.as_deref())?,
    }

    Ok(())
}

/// Every command except `doctor` needs a valid config to start
fn require_config(loaded: sahayak::Result<Config>) -> Result<Config> {
    let config = loaded.context("Failed to load configuration")?;
    tracing::debug!("configuration loaded");
    Ok(config)
}

/// Credential is resolved once here; without it nothing else starts
fn require_api_key() -> Result<ApiKey> {
    ApiKey::from_env().context("Cannot start without an API key")
}

async fn run_server(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let api_key = require_api_key()?;
    let addr = config.bind_addr()?;
    let service = AssessmentService::from_config(&config, api_key)?;

    tracing::info!(
        primary = %config.models.primary,
        secondary = %config.models.secondary,
        "model tiers configured"
    );

    println!("{} http://{}", "Sahayak listening on".green().bold(), addr);
    server::serve(AppState::new(config, service), addr).await?;
    Ok(())
}

async fn run_assessment(config: Config, assess: &AssessArgs, show_progress: bool) -> Result<()> {
    let api_key = require_api_key()?;
    let service = AssessmentService::from_config(&config, api_key)?;
    let record = assess.to_intake()?;

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Analyzing protocols...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = service.assess(&record).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(result) => {
            print!("{}", render_report_text(&result, &config.render_options()));
            Ok(())
        }
        Err(e) if e.is_validation() => {
            eprintln!("{}", e.to_string().yellow().bold());
            std::process::exit(2);
        }
        Err(e @ TriageError::ModelUnavailable(_)) => {
            eprintln!("{} {}", "API Error:".red().bold(), e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_doctor(config: sahayak::Result<Config>) -> Result<()> {
    let doctor = Doctor::new(config, ApiKey::from_env());
    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    if Doctor::overall_status(&checks) {
        println!("{}", "All checks passed".green().bold());
        Ok(())
    } else {
        println!("{}", "Some checks failed".red().bold());
        std::process::exit(1);
    }
}

fn show_config(config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(Config::default_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no home directory)".to_string());
    let key_status = match ApiKey::from_env() {
        Ok(_) => "set".green(),
        Err(_) => "missing".red(),
    };

    println!("{} {}", "Config file:".bold(), path);
    println!("{} {} ({})", "API key:".bold(), key_status, ApiKey::ENV_VARS.join(" / "));
    println!();
    println!("{}", toml::to_string_pretty(config).context("Failed to render configuration")?);
    Ok(())
}
