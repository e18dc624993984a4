#![deny(clippy::pedantic, unsafe_code)]

//! Detached minisign verification for release archives
//!
//! Only the release source archive is signed upstream. The public key is a
//! compile-time constant and is never read from configuration.

use ghostup_errors::SigningError;
use minisign_verify::{PublicKey, Signature};
use std::fs;
use std::path::Path;

/// Checks an artifact against its detached signature file
pub trait Verifier: Send + Sync {
    /// Verify `content_path` against the signature stored at `signature_path`.
    ///
    /// # Errors
    /// Returns an error if either file cannot be read, the signature cannot
    /// be parsed, or the content does not match.
    fn verify_file(&self, content_path: &Path, signature_path: &Path) -> Result<(), SigningError>;
}

/// Minisign verifier bound to a single trusted public key
#[derive(Debug, Clone)]
pub struct MinisignVerifier {
    public_key: String,
}

impl MinisignVerifier {
    /// Create a verifier for the given base64 public key
    #[must_use]
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    /// Verifier for the upstream release key
    #[must_use]
    pub fn release() -> Self {
        Self::new(ghostup_config::constants::RELEASE_PUBLIC_KEY)
    }
}

impl Verifier for MinisignVerifier {
    fn verify_file(&self, content_path: &Path, signature_path: &Path) -> Result<(), SigningError> {
        verify_minisign_file(content_path, signature_path, &self.public_key)
    }
}

/// Verify the file at `content_path` against the minisign signature file at
/// `signature_path` using `public_key_b64`.
///
/// # Errors
/// Returns an error if the content or signature cannot be read, the signature
/// cannot be parsed, the key is malformed, or verification fails.
pub fn verify_minisign_file(
    content_path: &Path,
    signature_path: &Path,
    public_key_b64: &str,
) -> Result<(), SigningError> {
    let path = content_path.display().to_string();

    let signature_str =
        fs::read_to_string(signature_path).map_err(|e| SigningError::InvalidSignatureFormat {
            path: signature_path.display().to_string(),
            reason: format!("cannot read signature: {e}"),
        })?;
    let content = fs::read(content_path).map_err(|e| SigningError::VerificationFailed {
        path: path.clone(),
        reason: format!("cannot read content: {e}"),
    })?;

    verify_minisign_bytes(&content, &signature_str, public_key_b64).map_err(|err| match err {
        SigningError::VerificationFailed { reason, .. } => {
            SigningError::VerificationFailed { path, reason }
        }
        SigningError::InvalidSignatureFormat { reason, .. } => {
            SigningError::InvalidSignatureFormat {
                path: signature_path.display().to_string(),
                reason,
            }
        }
        other @ SigningError::InvalidPublicKey(_) => other,
    })
}

/// Verify raw bytes against a minisign signature string.
///
/// # Errors
/// Returns an error if the signature or key cannot be parsed or the content
/// does not match.
pub fn verify_minisign_bytes(
    content: &[u8],
    signature_str: &str,
    public_key_b64: &str,
) -> Result<(), SigningError> {
    // Full minisign text including both comment lines
    let sig = Signature::decode(signature_str).map_err(|e| SigningError::InvalidSignatureFormat {
        path: String::new(),
        reason: e.to_string(),
    })?;

    let pk = PublicKey::from_base64(public_key_b64)
        .map_err(|e| SigningError::InvalidPublicKey(e.to_string()))?;

    pk.verify(content, &sig, false)
        .map_err(|e| SigningError::VerificationFailed {
            path: String::new(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_key_parses() {
        assert!(PublicKey::from_base64(ghostup_config::constants::RELEASE_PUBLIC_KEY).is_ok());
    }

    #[test]
    fn test_garbage_signature_is_format_error() {
        let err = verify_minisign_bytes(
            b"data",
            "not a signature",
            ghostup_config::constants::RELEASE_PUBLIC_KEY,
        )
        .unwrap_err();
        assert!(matches!(err, SigningError::InvalidSignatureFormat { .. }));
    }
}
