use crate::{
    cavage::{InvalidComponent, ParseError},
    BoxError,
};
use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

/// Error of a sign or verify call
///
/// Every variant is terminal for the call that produced it. Nothing is retried internally.
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// The caller's context was cancelled before the cryptographic work started
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the cryptographic work started
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The async key resolver failed
    #[error("Failed to resolve public key")]
    GetKey(#[source] BoxError),

    /// A covered header has a value that isn't visible ASCII
    #[error("Header `{name}` has a non-ASCII value")]
    InvalidHeaderValue {
        /// Name of the offending header
        name: String,
    },

    /// A header name passed to the signer can't take part in a signature
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidComponent(#[from] InvalidComponent),

    /// The key ID can't be carried in a signature header
    #[error("Invalid key ID `{0}`")]
    InvalidKeyId(String),

    /// Key material failed to parse or isn't an RSA key
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidKey(#[from] crate::crypto::parse::Error),

    /// The signature header failed to parse
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedSignatureHeader(#[from] ParseError),

    /// Headers named by the signature are absent from the request
    #[error("Missing header(s): {}", .names.join(", "))]
    MissingHeader {
        /// Every absent header, in the order the signature lists them
        names: Vec<String>,
    },

    /// The `Date` header is absent or not a valid HTTP date
    #[error("Missing or invalid `Date` header")]
    MissingOrInvalidDate,

    /// Neither a `Signature` nor an `Authorization: Signature` header is present
    #[error("Missing signature")]
    MissingSignature,

    /// The `Date` header lies further in the future than the configured skew allows
    #[error("Request is dated {skew:?} in the future (allowed: {max_skew:?})")]
    RequestFromFuture {
        /// How far ahead the request is dated
        skew: Duration,

        /// Configured tolerance
        max_skew: Duration,
    },

    /// The `Date` header lies further in the past than the freshness window allows
    #[error("Request is too old to process (age: {age:?}, allowed: {max_age:?})")]
    RequestTooOld {
        /// Age of the request
        age: Duration,

        /// Configured freshness window
        max_age: Duration,
    },

    /// The signature doesn't match the request under the supplied public key
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The crypto backend failed to produce a signature
    #[error("Failed to sign the signature string")]
    Signing,

    /// The signature doesn't cover a component the verifier requires
    #[error("Signature doesn't cover the required component `{0}`")]
    UncoveredComponent(String),
}
