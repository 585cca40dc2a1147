//! Payment slip verification: QR decoding, verification API, chat notification

pub mod client;
pub mod messages;
pub mod qr;
pub mod verifier;

// Re-exports for convenience
pub use client::{EasySlipClient, SlipDetails, SlipOutcome, VerificationApi};
pub use qr::DecodeOutcome;
pub use verifier::{CheckReport, SlipChecker, Stage, VerifyPath};
