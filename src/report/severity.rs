//! Severity tiers and the keyword classifier
//!
//! Classification is a case-insensitive substring scan in fixed priority
//! order: RED, then YELLOW/AMBER, else GREEN. Incidental words match too
//! ("red blood cells", "reduced"), so narrative text can push a report to
//! RED. That over-triage is kept as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage tier reported by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Critical, immediate action
    Red,
    /// Urgent
    Yellow,
    /// Stable, routine care
    Green,
}

/// Keywords per tier, checked in this order
const KEYWORDS: &[(Severity, &[&str])] = &[
    (Severity::Red, &["RED"]),
    (Severity::Yellow, &["YELLOW", "AMBER"]),
];

impl Severity {
    /// Left-border color of the report card
    pub fn border_color(&self) -> &'static str {
        match self {
            Severity::Red => "#dc3545",
            Severity::Yellow => "#ffc107",
            Severity::Green => "#28a745",
        }
    }

    /// Whether the emergency path (call link, referral slip) is shown
    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::Red | Severity::Yellow)
    }

    /// Short description paired with the tier name
    pub fn description(&self) -> &'static str {
        match self {
            Severity::Red => "CRITICAL",
            Severity::Yellow => "URGENT",
            Severity::Green => "STABLE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Red => "RED",
            Severity::Yellow => "YELLOW",
            Severity::Green => "GREEN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.description())
    }
}

/// Classify model text into a tier
pub fn classify(text: &str) -> Severity {
    let upper = text.to_uppercase();

    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| upper.contains(word)))
        .map(|(severity, _)| *severity)
        .unwrap_or(Severity::Green)
}
