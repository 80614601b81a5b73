//! Page layout: intake form on the left, report or error on the right

use crate::cli::config::ReportConfig;
use crate::intake::{Gender, IntakeRecord, OperatorRole, OutputLanguage, MAX_AGE};
use crate::report::{escape_html, Theme};

const DISCLAIMER: &str = "DEMO MODE: FOR RESEARCH/HACKATHON ONLY. NOT FOR MEDICAL USE.";

fn stylesheet(theme: Theme) -> String {
    format!(
        r#"body {{ background: {bg}; color: {fg}; font-family: sans-serif; margin: 0; }}
h1 {{ color: {accent}; padding: 16px 24px 0; margin: 0; }}
.subtitle {{ padding: 0 24px; opacity: 0.8; }}
.layout {{ display: flex; gap: 32px; padding: 24px; flex-wrap: wrap; }}
.layout > section {{ flex: 1 1 360px; }}
label {{ display: block; margin-top: 10px; }}
input, select, textarea {{ width: 100%; box-sizing: border-box; }}
input[type=checkbox] {{ width: auto; }}
button {{ margin-top: 16px; width: 100%; padding: 10px; background: {accent}; color: #fff; border: 0; font-weight: 900; }}
.report-card {{ background: #fff; color: #333; padding: 25px; border-radius: 10px; margin-bottom: 20px; }}
.model-caption {{ text-align: right; font-size: 0.8rem; color: #888; }}
.emergency .alert, .error-box {{ background: #ff4b4b; color: #fff; padding: 12px; border-radius: 6px; font-weight: 800; }}
.emergency .actions {{ display: flex; gap: 12px; margin: 12px 0 20px; }}
.emergency .actions a {{ flex: 1; text-align: center; padding: 10px; background: #fff; color: #000; font-weight: 900; border: 2px solid #ff4b4b; text-decoration: none; }}
.disclaimer {{ background: #ffcc00; color: #000; margin: 24px; padding: 8px; border: 2px solid #000; text-align: center; font-weight: 800; }}
"#,
        bg = theme.background(),
        fg = theme.foreground(),
        accent = theme.accent(),
    )
}

fn options<T: Copy + PartialEq>(all: &[T], selected: T, label: impl Fn(T) -> &'static str) -> String {
    all.iter()
        .map(|&value| {
            let text = label(value);
            let marker = if value == selected { " selected" } else { "" };
            format!(r#"<option value="{text}"{marker}>{text}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Intake form, pre-filled from `record`
pub fn render_form(record: &IntakeRecord) -> String {
    let vitals = &record.vitals;
    format!(
        r#"<form method="post" action="/assess" enctype="multipart/form-data">
  <h3>Patient Intake</h3>
  <label>Operator Role <select name="role">{roles}</select></label>
  <label>Patient Age <input type="number" name="age" min="0" max="{max_age}" value="{age}"></label>
  <label>Gender <select name="gender">{genders}</select></label>
  <h3>Vitals</h3>
  <label>BP <input name="bp" placeholder="120/80" value="{bp}"></label>
  <label>HR <input name="hr" placeholder="72" value="{hr}"></label>
  <label>Temp (°F) <input name="temp" placeholder="98.6" value="{temp}"></label>
  <h3>Clinical Narrative</h3>
  <label>Describe Symptoms <textarea name="symptoms" rows="6" placeholder="E.g., Severe chest pain...">{symptoms}</textarea></label>
  <h3>Visual Evidence</h3>
  <label>Upload Image <input type="file" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png"></label>
  <label>Output Language <select name="language">{languages}</select></label>
  <label><input type="checkbox" name="consent"{consent}> I certify patient consent obtained.</label>
  <button type="submit">RUN CLINICAL ASSESSMENT</button>
</form>
"#,
        roles = options(OperatorRole::ALL, record.role, |r| r.label()),
        max_age = MAX_AGE,
        age = record.age,
        genders = options(Gender::ALL, record.gender, |g| g.label()),
        bp = escape_html(&vitals.blood_pressure),
        hr = escape_html(&vitals.heart_rate),
        temp = escape_html(&vitals.temperature),
        symptoms = escape_html(&record.symptoms),
        languages = options(OutputLanguage::ALL, record.language, |l| l.label()),
        consent = if record.consent_given { " checked" } else { "" },
    )
}

/// Full page: form plus whatever goes in the result column
pub fn render_page(config: &ReportConfig, record: &IntakeRecord, result_html: &str) -> String {
    let title = escape_html(&config.title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{style}</style>
</head>
<body>
<h1>{title}</h1>
<p class="subtitle">AI-Powered Clinical Decision Support for frontline health workers</p>
<div class="layout">
<section>
{form}</section>
<section>
{result}</section>
</div>
<div class="disclaimer">{disclaimer}</div>
</body>
</html>
"#,
        title = title,
        style = stylesheet(config.theme),
        form = render_form(record),
        result = result_html,
        disclaimer = DISCLAIMER,
    )
}
