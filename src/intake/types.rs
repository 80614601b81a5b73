//! Intake form types
//!
//! Each enum round-trips through the label shown on the form, so the same
//! strings serve the HTML `<select>` options, CLI flags and the prompt.

use crate::errors::TriageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest accepted patient age
pub const MAX_AGE: u32 = 120;

/// Age pre-filled on a fresh form
pub const DEFAULT_AGE: u32 = 45;

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label as displayed and as accepted by `from_str`
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = TriageError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| TriageError::InvalidField {
                        field: $field,
                        value: wanted.to_string(),
                    })
            }
        }
    };
}

labelled_enum!(
    /// Who is operating the tool
    OperatorRole, "role" {
        AshaWorker => "ASHA Worker",
        PhcNurse => "PHC Nurse",
        EmergencyEmt => "Emergency EMT",
    }
);

labelled_enum!(
    /// Patient gender as captured on the form
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
);

labelled_enum!(
    /// Language the report should be written in
    OutputLanguage, "language" {
        English => "English",
        Hindi => "Hindi",
        Telugu => "Telugu",
        Tamil => "Tamil",
        Kannada => "Kannada",
    }
);

impl Default for OperatorRole {
    fn default() -> Self {
        OperatorRole::AshaWorker
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

impl Default for OutputLanguage {
    fn default() -> Self {
        OutputLanguage::English
    }
}

/// Free-text vital signs, passed through to the prompt untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
}
