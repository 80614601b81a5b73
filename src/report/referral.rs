//! Downloadable referral slip

use chrono::{DateTime, Local};

/// File name offered for the download
pub const REFERRAL_FILE_NAME: &str = "referral.txt";

/// Plain-text slip handed to the receiving facility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralSlip {
    pub age: u32,
    pub issued_at: DateTime<Local>,
}

impl ReferralSlip {
    pub fn new(age: u32) -> Self {
        Self {
            age,
            issued_at: Local::now(),
        }
    }

    /// Slip body. Priority is always HIGH: slips only exist on the emergency path.
    pub fn render(&self) -> String {
        format!(
            "REFERRAL SLIP\nPatient: {}\nPriority: HIGH\nIssued: {}\n",
            self.age,
            self.issued_at.format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slip_contents() {
        let slip = ReferralSlip {
            age: 45,
            issued_at: Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        };
        assert_eq!(
            slip.render(),
            "REFERRAL SLIP\nPatient: 45\nPriority: HIGH\nIssued: 2026-03-14 09:30\n"
        );
    }

    #[test]
    fn test_new_slip_has_priority_marker() {
        let text = ReferralSlip::new(7).render();
        assert!(text.contains("Patient: 7"));
        assert!(text.contains("Priority: HIGH"));
    }
}
