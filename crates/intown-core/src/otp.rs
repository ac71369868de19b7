//! One-time-password delivery and verification.
//!
//! [`OtpProvider`] is the seam for an SMS integration. The only implementation
//! is [`FixedCodeOtp`], which sends nothing and accepts one configured code.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("otp delivery failed: {0}")]
    Delivery(String),
}

/// Outcome of a send request, echoed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDispatch {
    pub message: String,
}

#[async_trait]
pub trait OtpProvider: Send + Sync {
    /// Deliver a code to `phone`.
    async fn send(&self, phone: &str) -> Result<OtpDispatch, OtpError>;

    /// Check `code` for `phone`. `Ok(false)` means a wrong code, not a failure.
    async fn verify(&self, phone: &str, code: &str) -> Result<bool, OtpError>;
}

/// Mock provider: every phone shares one code from configuration.
#[derive(Debug, Clone)]
pub struct FixedCodeOtp {
    code: String,
}

impl FixedCodeOtp {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl OtpProvider for FixedCodeOtp {
    async fn send(&self, phone: &str) -> Result<OtpDispatch, OtpError> {
        tracing::info!(phone, "sending otp (mock, no sms delivered)");
        Ok(OtpDispatch {
            message: format!(
                "OTP sent successfully to {phone}. Use {} for testing.",
                self.code
            ),
        })
    }

    async fn verify(&self, phone: &str, code: &str) -> Result<bool, OtpError> {
        let ok = code == self.code;
        if !ok {
            tracing::debug!(phone, "otp mismatch");
        }
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_mentions_phone_and_code() {
        let otp = FixedCodeOtp::new("1234");
        let dispatch = otp.send("+919876543210").await.expect("send");
        assert_eq!(
            dispatch.message,
            "OTP sent successfully to +919876543210. Use 1234 for testing."
        );
    }

    #[tokio::test]
    async fn verify_accepts_only_configured_code() {
        let otp = FixedCodeOtp::new("1234");
        assert!(otp.verify("+91000", "1234").await.expect("verify"));
        assert!(!otp.verify("+91000", "4321").await.expect("verify"));
        assert!(!otp.verify("+91000", "").await.expect("verify"));
        assert!(!otp.verify("+91000", "12345").await.expect("verify"));
    }

    #[tokio::test]
    async fn verify_uses_overridden_code() {
        let otp: Box<dyn OtpProvider> = Box::new(FixedCodeOtp::new("0000"));
        assert!(otp.verify("+91000", "0000").await.expect("verify"));
        assert!(!otp.verify("+91000", "1234").await.expect("verify"));
    }
}
