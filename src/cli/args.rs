//! Command-line argument parsing for Sahayak
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::errors::{Result, TriageError};
use crate::intake::{
    mime_from_extension, Gender, IntakeRecord, OperatorRole, OutputLanguage, Vitals, DEFAULT_AGE,
};
use crate::models::ImageAttachment;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Sahayak - AI-assisted clinical triage for frontline health workers
#[derive(Parser, Debug)]
#[command(name = "sahayak")]
#[command(version)]
#[command(about = "AI-assisted clinical triage for frontline health workers", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the intake form and reports over HTTP
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one assessment from the terminal
    Assess(AssessArgs),

    /// Check credential, configuration and model reachability
    Doctor,

    /// Display current configuration
    Config,
}

/// Intake fields for a terminal assessment
#[derive(ClapArgs, Debug, Clone)]
pub struct AssessArgs {
    /// Operator role ("ASHA Worker", "PHC Nurse", "Emergency EMT")
    #[arg(long, default_value = "ASHA Worker")]
    pub role: String,

    /// Patient age in years
    #[arg(long, default_value_t = DEFAULT_AGE)]
    pub age: u32,

    /// Patient gender (Male, Female, Other)
    #[arg(long, default_value = "Male")]
    pub gender: String,

    /// Blood pressure, e.g. 120/80
    #[arg(long, default_value = "")]
    pub bp: String,

    /// Heart rate, e.g. 72
    #[arg(long, default_value = "")]
    pub hr: String,

    /// Temperature in °F, e.g. 98.6
    #[arg(long, default_value = "")]
    pub temp: String,

    /// Symptom description
    #[arg(short, long, default_value = "")]
    pub symptoms: String,

    /// Image file (JPEG or PNG) to attach as visual evidence
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Report language (English, Hindi, Telugu, Tamil, Kannada)
    #[arg(short, long, default_value = "English")]
    pub language: String,

    /// Certify that patient consent was obtained
    #[arg(long)]
    pub consent: bool,
}

impl AssessArgs {
    /// Build the intake record, reading the image file if one was given
    pub fn to_intake(&self) -> Result<IntakeRecord> {
        let image = match &self.image {
            Some(path) => {
                let name = path.to_string_lossy();
                let mime = mime_from_extension(&name)
                    .ok_or_else(|| TriageError::UnsupportedImage(name.to_string()))?;
                let data = std::fs::read(path)?;
                Some(ImageAttachment::new(mime, data))
            }
            None => None,
        };

        Ok(IntakeRecord {
            role: self.role.parse::<OperatorRole>()?,
            age: self.age,
            gender: self.gender.parse::<Gender>()?,
            vitals: Vitals {
                blood_pressure: self.bp.clone(),
                heart_rate: self.hr.clone(),
                temperature: self.temp.clone(),
            },
            symptoms: self.symptoms.clone(),
            image,
            language: self.language.parse::<OutputLanguage>()?,
            consent_given: self.consent,
        })
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "sahayak=error",
            Verbosity::Normal => "sahayak=info",
            Verbosity::Verbose => "sahayak=debug",
            Verbosity::VeryVerbose => "sahayak=trace",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
