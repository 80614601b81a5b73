//! Sahayak - AI-assisted clinical triage
//!
//! Collects patient intake, asks a hosted generative model for a triage
//! report (falling back from a primary to a secondary model once), and
//! renders the report with emergency actions for RED/YELLOW outcomes.
//!
//! # Architecture
//!
//! - **intake / prompt**: form data and the prompt built from it
//! - **models**: model client seam and the two-tier invoker
//! - **report**: fence stripping, severity classification, rendering
//! - **assessment**: one request end to end
//! - **server / cli / doctor**: operator-facing surfaces

pub mod errors;

// Re-export commonly used types
pub use errors::{Result, TriageError};

pub mod assessment;
pub mod intake;
pub mod models;
pub mod prompt;
pub mod report;

pub mod cli;
pub mod doctor;
pub mod server;
pub mod telemetry;

pub use assessment::{AssessmentResult, AssessmentService};
pub use intake::IntakeRecord;
pub use report::Severity;
