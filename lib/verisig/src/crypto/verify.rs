use super::PublicKey;
use crate::cavage::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Failed to decode the Base64 payload
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

impl From<VerifyError> for crate::Error {
    fn from(value: VerifyError) -> Self {
        match value {
            VerifyError::Base64(..) => ParseError::InvalidSignatureEncoding.into(),
            VerifyError::Verification => Self::SignatureMismatch,
        }
    }
}

/// Verify that the message corresponds with the signature using the provided public key
#[inline]
pub fn verify(msg: &[u8], encoded_signature: &str, key: &PublicKey) -> Result<(), VerifyError> {
    let signature = base64_simd::STANDARD.decode_to_vec(encoded_signature)?;
    key.0
        .verify(msg, &signature)
        .map_err(|_| VerifyError::Verification)
}
