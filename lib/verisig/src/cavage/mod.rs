//!
//! Cavage HTTP signatures (`draft-cavage-http-signatures`)
//!

mod components;
mod parse;
mod serialise;

pub mod signature_string;

pub use self::components::{Component, InvalidComponent, SignedHeaders};
pub use self::parse::{parse, ParseError};
pub use self::serialise::serialise;

/// Algorithm name emitted by the signer
pub const ALGORITHM: &str = "rsa-sha256";

/// Parsed or to-be-serialised `Signature` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    /// URI identifying the signer and its key
    pub key_id: &'a str,

    /// Declared algorithm
    pub algorithm: &'a str,

    /// Components covered by the signature, in signing-string order
    pub headers: SignedHeaders,

    /// Base64-encoded signature
    pub signature: &'a str,
}
