use super::PrivateKey;
use miette::Diagnostic;
use ring::{rand::SystemRandom, signature::RSA_PKCS1_SHA256};
use thiserror::Error;

/// Signing error
#[derive(Debug, Diagnostic, Error)]
#[error("Failed to sign message")]
pub struct SignError;

impl From<SignError> for crate::Error {
    fn from(_: SignError) -> Self {
        Self::Signing
    }
}

/// Sign a message with RSASSA-PKCS1-v1_5 over SHA-256 and encode the signature in Base64
#[inline]
pub fn sign(payload: &[u8], key: &PrivateKey) -> Result<String, SignError> {
    let mut buf = vec![0; key.0.public().modulus_len()];

    let rng = SystemRandom::new();
    key.0
        .sign(&RSA_PKCS1_SHA256, &rng, payload, &mut buf)
        .map_err(|_| SignError)?;

    Ok(base64_simd::STANDARD.encode_to_string(buf))
}
