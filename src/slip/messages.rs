use super::client::{SlipDetails, SlipOutcome};

pub const REACTION_VERIFIED: &str = "😁";
pub const REACTION_SUSPICIOUS: &str = "😡";

/// Shown when the bank has no record of the transfer.
pub const FORGERY_WARNING: &str = "อ่านข้อมูลจาก QR Code ไม่ได้ สุ่มเสี่ยงเป็น slip ปลอม";

/// Reaction and reply for a verification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub reaction: Option<&'static str>,
    pub text: String,
}

pub fn notification_for(outcome: &SlipOutcome) -> Notification {
    match outcome {
        SlipOutcome::Verified(details) => Notification {
            reaction: Some(REACTION_VERIFIED),
            text: verified_text(details),
        },
        SlipOutcome::NotFound { message } => Notification {
            reaction: Some(REACTION_SUSPICIOUS),
            text: format!("*Error {}*\n{}", message, FORGERY_WARNING),
        },
        SlipOutcome::Other { message, .. } => Notification {
            reaction: None,
            text: message.clone(),
        },
    }
}

fn verified_text(details: &SlipDetails) -> String {
    format!(
        "*Transaction Reference:* {}\n*Date:* {}\n*Amount:* {}\n*Sender:* {}\n*Receiver:* {}",
        details.trans_ref, details.date, details.amount, details.sender_name, details.receiver_name
    )
}
