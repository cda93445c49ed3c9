//!
//! Deserialisable configuration for the signer and the verifier
//!

use crate::{
    cavage::{InvalidComponent, SignedHeaders},
    FreshnessWindow, Signer, Verifier,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_max_age_hours() -> u64 {
    12
}

fn default_required_headers() -> Vec<String> {
    SignedHeaders::minimum()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_true() -> bool {
    true
}

/// Signer and verifier configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Outgoing requests
    #[serde(default)]
    pub signing: SigningConfiguration,

    /// Incoming requests
    #[serde(default)]
    pub verification: VerificationConfiguration,
}

/// Signer configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SigningConfiguration {
    /// Header names to sign, in order. Opinionated defaults if absent
    pub headers: Option<Vec<String>>,
}

/// Verifier configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerificationConfiguration {
    /// Maximum age of a request's `Date` header
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,

    /// How far in the future a `Date` header may lie. Unbounded if absent
    pub max_future_skew_secs: Option<u64>,

    /// Components every signature has to cover
    #[serde(default = "default_required_headers")]
    pub required_headers: Vec<String>,

    /// Compare covered `Digest` headers against the body
    #[serde(default = "default_true")]
    pub check_digest: bool,
}

impl Default for VerificationConfiguration {
    fn default() -> Self {
        Self {
            max_age_hours: default_max_age_hours(),
            max_future_skew_secs: None,
            required_headers: default_required_headers(),
            check_digest: true,
        }
    }
}

impl TryFrom<&SigningConfiguration> for Signer {
    type Error = InvalidComponent;

    fn try_from(value: &SigningConfiguration) -> Result<Self, Self::Error> {
        let signer = match value.headers {
            Some(ref headers) => Signer::builder()
                .headers(SignedHeaders::from_names(headers)?)
                .build(),
            None => Signer::default(),
        };

        Ok(signer)
    }
}

impl TryFrom<&VerificationConfiguration> for Verifier {
    type Error = InvalidComponent;

    fn try_from(value: &VerificationConfiguration) -> Result<Self, Self::Error> {
        let mut freshness = FreshnessWindow::from_hours(value.max_age_hours);
        if let Some(skew) = value.max_future_skew_secs {
            freshness = freshness.with_max_future_skew(Duration::from_secs(skew));
        }

        Ok(Verifier::builder()
            .freshness(freshness)
            .required_headers(SignedHeaders::from_names(&value.required_headers)?)
            .check_digest(value.check_digest)
            .build())
    }
}
