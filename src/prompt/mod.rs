//! Prompt composition
//!
//! Interpolates an intake record into the fixed triage template. Pure and
//! infallible: blank fields simply show up blank.

use crate::intake::IntakeRecord;
use serde::{Deserialize, Serialize};

/// Name used for the middle (urgent) tier in the prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierVocabulary {
    #[default]
    Yellow,
    Amber,
}

impl TierVocabulary {
    /// Word used for the urgent tier
    pub fn urgent_word(&self) -> &'static str {
        match self {
            TierVocabulary::Yellow => "YELLOW",
            TierVocabulary::Amber => "AMBER",
        }
    }

    fn scale(&self) -> &'static str {
        match self {
            TierVocabulary::Yellow => "Red/Yellow/Green",
            TierVocabulary::Amber => "Red/Amber/Green",
        }
    }
}

/// Build the prompt sent to the model for one intake record
pub fn compose(record: &IntakeRecord, vocabulary: TierVocabulary) -> String {
    let urgent = vocabulary.urgent_word();
    let vitals = &record.vitals;

    format!(
        r#"ACT AS: Senior Medical Officer supporting a {role}.
PATIENT: {age}yo {gender}. BP: {bp}, HR: {hr}, Temp: {temp}.
SYMPTOMS: {symptoms}
IMAGE: {image}
LANGUAGE: {language}

TASK:
1. ANALYZE risk severity ({scale}).
2. PROVIDE a structured HTML report written in {language}.

IMPORTANT VISUAL INSTRUCTION:
Wrap the triage status word in a span with a specific color style.
- If RED: <span style='color: #dc3545; font-weight:900;'>RED (CRITICAL)</span>
- If {urgent}: <span style='color: #b38600; font-weight:900;'>{urgent} (URGENT)</span>
- If GREEN: <span style='color: #28a745; font-weight:900;'>GREEN (STABLE)</span>

OUTPUT FORMAT (HTML ONLY):
<div style="margin-bottom:10px;">
    <h2 style="margin:0; color:#333;">STATUS: [INSERT COLORED SPAN HERE]</h2>
</div>
<div style="margin-bottom:10px; color:#333;">
    <b>Clinical Reasoning:</b><br>
    [Bullet points]
</div>
<div style="background:#f9f9f9; padding:10px; border-radius:5px; color:#333;">
    <b>{role} Protocol:</b>
    <ul><li>Step 1...</li></ul>
</div>
"#,
        role = record.role,
        age = record.age,
        gender = record.gender,
        bp = vitals.blood_pressure.trim(),
        hr = vitals.heart_rate.trim(),
        temp = vitals.temperature.trim(),
        symptoms = record.symptoms.trim(),
        image = if record.image.is_some() {
            "attached, examine it as visual evidence"
        } else {
            "none"
        },
        language = record.language,
        scale = vocabulary.scale(),
        urgent = urgent,
    )
}
