//! Response post-processing and report rendering
//!
//! - `sanitize`: code-fence stripping
//! - `severity`: tier enum and keyword classifier
//! - `render`: HTML and terminal output
//! - `referral`: downloadable referral slip

pub mod referral;
pub mod render;
pub mod sanitize;
pub mod severity;

pub use referral::{ReferralSlip, REFERRAL_FILE_NAME};
pub use render::{
    escape_html, render_error_html, render_report_html, render_report_text, RenderOptions, Theme,
};
pub use sanitize::strip_code_fences;
pub use severity::{classify, Severity};
