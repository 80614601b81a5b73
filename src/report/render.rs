//! Report rendering
//!
//! HTML fragments for the web page and a colored plain-text form for the
//! terminal. The model's HTML is embedded as-is; everything we interpolate
//! ourselves is escaped.

use crate::assessment::AssessmentResult;
use crate::report::referral::ReferralSlip;
use crate::report::severity::Severity;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Page theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn background(&self) -> &'static str {
        match self {
            Theme::Dark => "#0e1117",
            Theme::Light => "#f4f6fa",
        }
    }

    pub fn foreground(&self) -> &'static str {
        match self {
            Theme::Dark => "#e0e0e0",
            Theme::Light => "#222222",
        }
    }

    pub fn accent(&self) -> &'static str {
        match self {
            Theme::Dark => "#B91372",
            Theme::Light => "#1f6feb",
        }
    }
}

/// Settings the renderer needs from configuration
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub emergency_number: String,
}

/// Escape text for safe interpolation into HTML
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Emergency banner, call link and referral download
fn emergency_section(result: &AssessmentResult, options: &RenderOptions) -> String {
    let number = escape_html(&options.emergency_number);
    format!(
        r#"<div class="emergency">
  <div class="alert">CRITICAL PROTOCOL ACTIVATED - IMMEDIATE ACTION REQUIRED</div>
  <div class="actions">
    <a class="call" href="tel:{number}">CALL {number} AMBULANCE</a>
    <a class="download" href="/referral?age={age}" download="{file}">DOWNLOAD REFERRAL SLIP</a>
  </div>
</div>
"#,
        number = number,
        age = result.age,
        file = super::REFERRAL_FILE_NAME,
    )
}

/// Report card plus, for RED/YELLOW, the emergency section above it
pub fn render_report_html(result: &AssessmentResult, options: &RenderOptions) -> String {
    let mut html = String::new();

    if result.severity.is_critical() {
        html.push_str(&emergency_section(result, options));
    }

    html.push_str(&format!(
        r#"<div class="report-card" style="border-left: 8px solid {color};">
  <div class="model-caption">Model: {model}</div>
  {body}
</div>
"#,
        color = result.severity.border_color(),
        model = escape_html(&result.model_used),
        body = result.report_html,
    ));

    html
}

/// Error box shown instead of a report
pub fn render_error_html(message: &str) -> String {
    format!(
        r#"<div class="error-box">{}</div>
"#,
        escape_html(message)
    )
}

/// Terminal rendering: severity banner, model caption, report text
pub fn render_report_text(result: &AssessmentResult, options: &RenderOptions) -> String {
    let banner = match result.severity {
        Severity::Red => result.severity.to_string().white().on_red().bold(),
        Severity::Yellow => result.severity.to_string().black().on_yellow().bold(),
        Severity::Green => result.severity.to_string().white().on_green().bold(),
    };

    let mut out = format!("STATUS: {}\n", banner);
    out.push_str(&format!("{}\n\n", format!("Model: {}", result.model_used).dimmed()));

    if result.severity.is_critical() {
        out.push_str(&format!(
            "{}\n",
            "CRITICAL PROTOCOL ACTIVATED - IMMEDIATE ACTION REQUIRED".red().bold()
        ));
        out.push_str(&format!("  Call {} for an ambulance\n\n", options.emergency_number));
        out.push_str(&ReferralSlip::new(result.age).render());
        out.push('\n');
    }

    out.push_str(result.report_html.trim());
    out.push('\n');
    out
}
