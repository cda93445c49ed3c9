//!
//! Parse cryptographic keys for use in the HTTP signature implementations
//!

use const_oid::db::rfc5912::RSA_ENCRYPTION;
use miette::Diagnostic;
use pkcs8::{
    der::{
        asn1::{SequenceOf, UintRef},
        Decode,
    },
    Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef,
};
use ring::signature::{RsaKeyPair, UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256};
use std::fmt;
use thiserror::Error;

const PKCS1_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const PKCS1_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

const MIN_MODULUS_BITS: usize = 2048;
const MAX_MODULUS_BITS: usize = 8192;

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed PEM or DER structure
    #[error(transparent)]
    #[diagnostic(code(verisig::key::der))]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected
    #[error(transparent)]
    #[diagnostic(code(verisig::key::rejected))]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    #[diagnostic(code(verisig::key::malformed))]
    MalformedKey,

    /// Unknown key type
    #[error("Unknown key type")]
    #[diagnostic(code(verisig::key::unknown_type), help("only RSA keys are supported"))]
    UnknownKeyType,

    /// RSA modulus outside of the supported range
    #[error("Unsupported key size of {0} bits")]
    #[diagnostic(code(verisig::key::unsupported_size))]
    UnsupportedKeySize(usize),
}

/// RSA private key used for signing
pub struct PrivateKey(pub(crate) RsaKeyPair);

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// RSA public key used for verification
#[derive(Clone, Debug)]
pub struct PublicKey(pub(crate) UnparsedPublicKey<Vec<u8>>);

/// Check that the DER is a PKCS#1 `RSAPublicKey` and that its modulus has a supported size
fn check_rsa_public_key(der: &[u8]) -> Result<(), Error> {
    let components = SequenceOf::<UintRef<'_>, 2>::from_der(der)?;
    let (Some(modulus), Some(_exponent)) = (components.get(0), components.get(1)) else {
        return Err(Error::MalformedKey);
    };

    let modulus = modulus.as_bytes();
    let Some(first_byte) = modulus.first() else {
        return Err(Error::MalformedKey);
    };
    let bits = modulus.len() * 8 - first_byte.leading_zeros() as usize;

    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
        return Err(Error::UnsupportedKeySize(bits));
    }

    Ok(())
}

/// Parse an RSA public key from its PEM form
///
/// Accepted encodings:
///
/// - SPKI (`PUBLIC KEY`), regardless of the PEM label
/// - PKCS#1 (`RSA PUBLIC KEY`)
#[inline]
pub fn public_key(pem: &str) -> Result<PublicKey, Error> {
    let (label, document) = Document::from_pem(pem.trim())?;

    let raw_bytes = match document.decode_msg::<SubjectPublicKeyInfoRef<'_>>() {
        Ok(spki) => {
            if spki.algorithm.oid != RSA_ENCRYPTION {
                return Err(Error::UnknownKeyType);
            }

            spki.subject_public_key
                .as_bytes()
                .ok_or(Error::MalformedKey)?
                .to_vec()
        }
        Err(..) if label == PKCS1_PUBLIC_KEY_LABEL => document.as_bytes().to_vec(),
        Err(error) => return Err(error.into()),
    };

    check_rsa_public_key(&raw_bytes)?;

    Ok(PublicKey(UnparsedPublicKey::new(
        &RSA_PKCS1_2048_8192_SHA256,
        raw_bytes,
    )))
}

/// Parse an RSA private key from its PEM form
///
/// This function uses constant-time PEM decoding and zeroizes any temporary allocations.
///
/// Accepted encodings:
///
/// - PKCS#1 (`RSA PRIVATE KEY`)
/// - PKCS#8 (`PRIVATE KEY`)
#[inline]
pub fn private_key(pem: &str) -> Result<PrivateKey, Error> {
    let (label, document) = SecretDocument::from_pem(pem.trim())?;

    let key_pair = match label {
        PKCS1_PRIVATE_KEY_LABEL => RsaKeyPair::from_der(document.as_bytes())?,
        PKCS8_PRIVATE_KEY_LABEL => {
            let private_key_info: PrivateKeyInfo<'_> = document.decode_msg()?;
            if private_key_info.algorithm.oid != RSA_ENCRYPTION {
                return Err(Error::UnknownKeyType);
            }

            RsaKeyPair::from_der(private_key_info.private_key)?
        }
        _ => return Err(Error::UnknownKeyType),
    };

    Ok(PrivateKey(key_pair))
}
