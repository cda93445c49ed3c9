//!
//! Easy and fool-proof HTTP signature handling
//!
//! Offers a simplistic interface for signing and verifying with opinionated defaults.
//! Verification integrates with async so that the public key can be resolved over the network,
//! but only after every check that doesn't need the key has passed.
//!

use crate::{digest, BoxError, Context, Error, Signer, Verifier};
use http::{Method, Request};
use std::{future::Future, time::SystemTime};
use tracing::{debug, instrument};

/// Sign an HTTP request using opinionated defaults
///
/// Requests with a body (anything but `GET` and `HEAD`) get a `Digest` header first, so that the
/// body is covered by the signature.
#[inline]
pub fn sign<B>(
    ctx: &Context,
    mut req: Request<B>,
    key_id: &str,
    private_key_pem: &str,
) -> Result<Request<B>, Error>
where
    B: AsRef<[u8]>,
{
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        digest::add_digest(&mut req);
    }

    Signer::default().sign_pem(ctx, req, key_id, private_key_pem)
}

/// Verify an HTTP request, resolving the public key through `get_key`
///
/// `get_key` receives the key ID declared by the signature and returns the PEM-encoded public
/// key. It is never called for requests that are malformed, stale, insufficiently covered, or
/// whose body doesn't match its covered `Digest` header.
#[inline]
#[instrument(skip_all)]
pub async fn verify<'r, B, F, Fut, E>(
    ctx: &Context,
    req: &'r Request<B>,
    verifier: &Verifier,
    get_key: F,
) -> Result<(), Error>
where
    B: AsRef<[u8]>,
    F: FnOnce(&'r str) -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: Into<BoxError>,
{
    let precheck = verifier.precheck(ctx, req, SystemTime::now())?;
    precheck.check_body(req.body().as_ref())?;

    let pem_key = get_key(precheck.key_id()).await.map_err(|error| {
        let error = error.into();
        debug!(%error, key_id = precheck.key_id(), "failed to resolve public key");
        Error::GetKey(error)
    })?;

    precheck.verify(ctx, &pem_key)
}
