//!
//! Public key extraction from ActivityPub actor documents
//!
//! Fetching the document is the caller's business. This module only picks the right key out of
//! a document that has already been retrieved.
//!

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// Actor document error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// The document isn't a valid actor document
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The document doesn't contain a key with the requested ID
    #[error("Actor has no public key with ID `{0}`")]
    KeyNotFound(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// Public key entry of an actor
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    /// Key ID
    pub id: String,

    /// Actor owning the key
    #[serde(default)]
    pub owner: Option<String>,

    /// PEM-encoded public key
    pub public_key_pem: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Actor {
    #[serde(default)]
    public_key: Option<OneOrMany<PublicKey>>,
}

/// Key ID without its fragment, i.e. the URL of the document holding the key
#[must_use]
pub fn key_owner(key_id: &str) -> &str {
    key_id
        .split_once('#')
        .map_or(key_id, |(document, _fragment)| document)
}

fn fragment(key_id: &str) -> Option<&str> {
    key_id
        .split_once('#')
        .map(|(_document, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

/// Find the public key with the given ID in an actor document
///
/// A key matches if its ID equals `key_id`, or if both IDs carry the same fragment
/// (`…#main-key`). `publicKey` may be a single object or a list.
pub fn find_public_key(actor_document: &str, key_id: &str) -> Result<PublicKey, Error> {
    let actor: Actor = serde_json::from_str(actor_document)?;
    let mut keys = actor.public_key.map(OneOrMany::into_vec).unwrap_or_default();
    let wanted_fragment = fragment(key_id);

    let position = keys
        .iter()
        .position(|key| key.id == key_id)
        .or_else(|| {
            wanted_fragment.and_then(|wanted| {
                keys.iter()
                    .position(|key| fragment(&key.id) == Some(wanted))
            })
        })
        .ok_or_else(|| Error::KeyNotFound(key_id.to_string()))?;

    Ok(keys.swap_remove(position))
}

/// PEM of the public key with the given ID in an actor document
pub fn public_key_pem(actor_document: &str, key_id: &str) -> Result<String, Error> {
    find_public_key(actor_document, key_id).map(|key| key.public_key_pem)
}
