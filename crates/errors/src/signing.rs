//! Signing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SigningError {
    #[error("signature verification failed for {path}: {reason}")]
    VerificationFailed { path: String, reason: String },

    #[error("invalid signature format in {path}: {reason}")]
    InvalidSignatureFormat { path: String, reason: String },

    #[error("invalid public key format: {0}")]
    InvalidPublicKey(String),
}

impl UserFacingError for SigningError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::VerificationFailed { .. } | Self::InvalidSignatureFormat { .. } => Some(
                "The release does not match its signature. Do not build it; report the mirror or pick another release.",
            ),
            Self::InvalidPublicKey(_) => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::VerificationFailed { .. } => "signing.verification_failed",
            Self::InvalidSignatureFormat { .. } => "signing.invalid_signature_format",
            Self::InvalidPublicKey(_) => "signing.invalid_public_key",
        };
        Some(code)
    }
}
