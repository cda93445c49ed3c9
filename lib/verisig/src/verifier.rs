//!
//! Verification of incoming requests
//!

use crate::{
    cavage::{self, signature_string, ParseError, SignatureHeader, SignedHeaders},
    crypto::{self, PublicKey},
    digest::{self, DIGEST_HEADER},
    Context, Error, FreshnessWindow, HttpRequest, SIGNATURE_HEADER,
};
use http::{
    header::{AUTHORIZATION, DATE},
    HeaderMap, Request,
};
use std::time::SystemTime;
use tracing::{debug, field, instrument, Span};
use typed_builder::TypedBuilder;

/// Read the signature parameters from `Signature`, falling back to `Authorization: Signature …`
fn signature_parameters(headers: &HeaderMap) -> Result<&str, Error> {
    if let Some(value) = headers.get(&SIGNATURE_HEADER) {
        return value.to_str().map_err(|_| ParseError::NonAscii.into());
    }

    headers
        .get_all(AUTHORIZATION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.trim_start().split_once(' '))
        .find(|(scheme, _)| scheme.eq_ignore_ascii_case("signature"))
        .map(|(_, parameters)| parameters.trim())
        .ok_or(Error::MissingSignature)
}

/// Verifies incoming requests
#[derive(Clone, Debug, TypedBuilder)]
pub struct Verifier {
    /// How old (and optionally how far in the future) the `Date` header may be
    #[builder(default)]
    freshness: FreshnessWindow,

    /// Components every accepted signature has to cover
    ///
    /// Defaults to `(request-target)` and `date`
    #[builder(default = SignedHeaders::minimum())]
    required_headers: SignedHeaders,

    /// Compare the `Digest` header against the body in [`Verifier::verify_with_body`]
    #[builder(default = true)]
    check_digest: bool,
}

impl Verifier {
    /// Run every check that doesn't need the public key
    ///
    /// In order: signature header parsing, `Date` parsing, freshness, and coverage of the
    /// required components. The returned [`Precheck`] exposes the key ID the caller has to
    /// supply a public key for.
    #[instrument(skip_all, fields(key_id = field::Empty))]
    pub fn precheck<'r, R>(
        &self,
        ctx: &Context,
        req: &'r R,
        now: SystemTime,
    ) -> Result<Precheck<'r, R>, Error>
    where
        R: HttpRequest + ?Sized,
    {
        ctx.check()?;

        let header = cavage::parse(signature_parameters(req.headers())?)?;
        Span::current().record("key_id", header.key_id);

        let date = req
            .headers()
            .get(DATE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| httpdate::parse_http_date(value).ok())
            .ok_or(Error::MissingOrInvalidDate)?;

        self.freshness.check(date, now).inspect_err(|error| {
            debug!(%error, "rejecting request outside of the freshness window");
        })?;

        if let Some(uncovered) = self
            .required_headers
            .iter()
            .find(|required| !header.headers.contains(required))
        {
            return Err(Error::UncoveredComponent(uncovered.to_string()));
        }

        Ok(Precheck {
            request: req,
            header,
            check_digest: self.check_digest,
        })
    }

    /// Verify the request against a PEM-encoded public key, reading the clock for freshness
    pub fn verify<R>(&self, ctx: &Context, req: &R, public_key_pem: &str) -> Result<(), Error>
    where
        R: HttpRequest + ?Sized,
    {
        self.verify_at(ctx, req, public_key_pem, SystemTime::now())
    }

    /// Verify the request against a PEM-encoded public key as of `now`
    pub fn verify_at<R>(
        &self,
        ctx: &Context,
        req: &R,
        public_key_pem: &str,
        now: SystemTime,
    ) -> Result<(), Error>
    where
        R: HttpRequest + ?Sized,
    {
        self.precheck(ctx, req, now)?.verify(ctx, public_key_pem)
    }

    /// Verify the request and, if `digest` is covered, that its body matches the `Digest` header
    ///
    /// A body that doesn't match its digest is reported as [`Error::SignatureMismatch`].
    pub fn verify_with_body<B>(
        &self,
        ctx: &Context,
        req: &Request<B>,
        public_key_pem: &str,
    ) -> Result<(), Error>
    where
        B: AsRef<[u8]>,
    {
        let precheck = self.precheck(ctx, req, SystemTime::now())?;
        precheck.check_body(req.body().as_ref())?;
        precheck.verify(ctx, public_key_pem)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Request that passed every check not involving the public key
#[derive(Debug)]
pub struct Precheck<'r, R>
where
    R: ?Sized,
{
    request: &'r R,
    header: SignatureHeader<'r>,
    check_digest: bool,
}

impl<'r, R> Precheck<'r, R>
where
    R: HttpRequest + ?Sized,
{
    /// Key ID declared by the signature
    #[must_use]
    pub fn key_id(&self) -> &'r str {
        self.header.key_id
    }

    /// The parsed signature header
    #[must_use]
    pub fn signature_header(&self) -> &SignatureHeader<'r> {
        &self.header
    }

    /// Compare the body against the covered `Digest` header
    ///
    /// Does nothing if the verifier doesn't check digests or the signature doesn't cover `digest`.
    /// An absent `Digest` header is left for [`Precheck::verify`] to report as
    /// [`Error::MissingHeader`].
    pub fn check_body(&self, body: &[u8]) -> Result<(), Error> {
        if !self.check_digest || !self.header.headers.contains_header(&DIGEST_HEADER) {
            return Ok(());
        }

        let Some(digest) = self.request.headers().get(&DIGEST_HEADER) else {
            return Ok(());
        };

        if !digest::matches(digest, body) {
            debug!("body doesn't match its digest");
            return Err(Error::SignatureMismatch);
        }

        Ok(())
    }

    /// Finish verification with a PEM-encoded public key
    pub fn verify(self, ctx: &Context, public_key_pem: &str) -> Result<(), Error> {
        ctx.check()?;
        let public_key = crypto::parse::public_key(public_key_pem)?;
        self.verify_with_key(ctx, &public_key)
    }

    /// Finish verification with an already parsed public key
    ///
    /// The signing string is rebuilt from the components the signature declares.
    #[instrument(skip_all, fields(key_id = self.header.key_id))]
    pub fn verify_with_key(self, ctx: &Context, public_key: &PublicKey) -> Result<(), Error> {
        let signature_string = signature_string::construct(self.request, &self.header.headers)?;

        ctx.check()?;
        crypto::verify(
            signature_string.as_bytes(),
            self.header.signature,
            public_key,
        )
        .inspect_err(|error| debug!(%error, "signature verification failed"))?;

        Ok(())
    }
}

/// Verify a request against a PEM-encoded public key, accepting it up to `max_age_hours` old
///
/// Returns `Ok(true)` only if parsing, freshness and the cryptographic check all succeed.
/// Every failure is reported as an error identifying the failed stage.
pub fn req_has_valid_signature<R>(
    ctx: &Context,
    req: &R,
    public_key_pem: &str,
    max_age_hours: u64,
) -> Result<bool, Error>
where
    R: HttpRequest + ?Sized,
{
    Verifier::builder()
        .freshness(FreshnessWindow::from_hours(max_age_hours))
        .build()
        .verify(ctx, req, public_key_pem)?;

    Ok(true)
}
