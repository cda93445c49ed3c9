//!
//! Cavage-style HTTP signatures for federated server-to-server requests
//!
//! Signs outgoing requests with an RSA private key and verifies incoming ones against the
//! sender's public key, rejecting requests that are malformed, forged, or too old.
//! Only RSA with SHA-256 (`rsa-sha256`) is implemented.
//!

#![deny(missing_docs)]

use http::HeaderName;

pub mod actor;
pub mod cavage;
pub mod config;
pub mod context;
pub mod crypto;
pub mod digest;
pub mod easy;
pub mod freshness;
pub mod request;
pub mod signer;
pub mod verifier;

mod error;

pub use self::context::Context;
pub use self::error::Error;
pub use self::freshness::FreshnessWindow;
pub use self::request::HttpRequest;
pub use self::signer::{sign_request, Signer};
pub use self::verifier::{req_has_valid_signature, Precheck, Verifier};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("signature");
