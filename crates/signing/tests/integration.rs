//! Integration tests for signature verification

#[cfg(test)]
mod tests {
    use ghostup_errors::SigningError;
    use ghostup_signing::*;
    use minisign::KeyPair;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sign(kp: &KeyPair, data: &[u8]) -> String {
        minisign::sign(
            None,
            &kp.sk,
            Cursor::new(data),
            Some("trusted comment"),
            Some("untrusted comment"),
        )
        .unwrap()
        .into_string()
    }

    fn write_pair(
        dir: &TempDir,
        data: &[u8],
        sig: &str,
    ) -> (std::path::PathBuf, std::path::PathBuf) {
        let content = dir.path().join("ghostty-1.2.0.tar.gz");
        let signature = dir.path().join("ghostty-1.2.0.tar.gz.minisig");
        std::fs::write(&content, data).unwrap();
        std::fs::write(&signature, sig).unwrap();
        (content, signature)
    }

    #[test]
    fn test_valid_signature_verifies() {
        let kp = KeyPair::generate_unencrypted_keypair().unwrap();
        let data = b"release archive bytes";
        let dir = TempDir::new().unwrap();
        let (content, signature) = write_pair(&dir, data, &sign(&kp, data));

        let verifier = MinisignVerifier::new(kp.pk.to_base64());
        verifier.verify_file(&content, &signature).unwrap();
    }

    #[test]
    fn test_tampered_content_fails_with_path() {
        let kp = KeyPair::generate_unencrypted_keypair().unwrap();
        let dir = TempDir::new().unwrap();
        let (content, signature) = write_pair(&dir, b"tampered", &sign(&kp, b"original"));

        let err = verify_minisign_file(&content, &signature, &kp.pk.to_base64()).unwrap_err();
        match err {
            SigningError::VerificationFailed { path, .. } => {
                assert!(path.ends_with("ghostty-1.2.0.tar.gz"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = KeyPair::generate_unencrypted_keypair().unwrap();
        let other = KeyPair::generate_unencrypted_keypair().unwrap();
        let data = b"release archive bytes";
        let dir = TempDir::new().unwrap();
        let (content, signature) = write_pair(&dir, data, &sign(&signer, data));

        let result = MinisignVerifier::new(other.pk.to_base64()).verify_file(&content, &signature);
        assert!(matches!(
            result,
            Err(SigningError::VerificationFailed { .. })
        ));
    }

    #[test]
    fn test_missing_signature_file() {
        let kp = KeyPair::generate_unencrypted_keypair().unwrap();
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("a.tar.gz");
        std::fs::write(&content, b"x").unwrap();

        let err = verify_minisign_file(
            &content,
            &dir.path().join("missing.minisig"),
            &kp.pk.to_base64(),
        )
        .unwrap_err();
        assert!(matches!(err, SigningError::InvalidSignatureFormat { .. }));
    }

    #[test]
    fn test_invalid_public_key() {
        let kp = KeyPair::generate_unencrypted_keypair().unwrap();
        let err = verify_minisign_bytes(b"data", &sign(&kp, b"data"), "not-a-key").unwrap_err();
        assert!(matches!(err, SigningError::InvalidPublicKey(_)));
    }
}
