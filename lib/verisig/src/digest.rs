//!
//! `Digest` header handling
//!
//! Signing the `Digest` header is how the body of a request ends up covered by its signature.
//!

use http::{HeaderName, HeaderValue, Request};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Name of the `Digest` header
pub static DIGEST_HEADER: HeaderName = HeaderName::from_static("digest");

const SHA256_PREFIX: &str = "SHA-256=";

/// `Digest` header value of a body (`SHA-256=<base64>`)
#[must_use]
pub fn body_digest(body: &[u8]) -> HeaderValue {
    let encoded = base64_simd::STANDARD.encode_to_string(Sha256::digest(body));

    HeaderValue::try_from(format!("{SHA256_PREFIX}{encoded}"))
        .expect("[Bug] Base64 encoding produced a non-ASCII character")
}

/// Set the `Digest` header of the request to the digest of its body
///
/// Overwrites an existing `Digest` header.
pub fn add_digest<B>(req: &mut Request<B>)
where
    B: AsRef<[u8]>,
{
    let digest = body_digest(req.body().as_ref());
    req.headers_mut().insert(&DIGEST_HEADER, digest);
}

/// Check whether the `Digest` header value matches the body
///
/// The header may list several digests. Only SHA-256 is checked; the value matches if any of
/// its SHA-256 entries matches.
#[must_use]
pub fn matches(header: &HeaderValue, body: &[u8]) -> bool {
    let Ok(header) = header.to_str() else {
        return false;
    };

    let expected = body_digest(body);
    let expected = &expected.as_bytes()[SHA256_PREFIX.len()..];

    header
        .split(',')
        .filter_map(|entry| entry.trim().split_once('='))
        .filter(|(algorithm, _)| algorithm.eq_ignore_ascii_case("sha-256"))
        .any(|(_, value)| bool::from(value.as_bytes().ct_eq(expected)))
}

#[cfg(test)]
mod test {
    use http::{HeaderValue, Request};

    const BODY: &str = r#"{"hello": "world"}"#;
    const DIGEST: &str = "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=";

    #[test]
    fn known_digest() {
        assert_eq!(super::body_digest(BODY.as_bytes()), DIGEST);
    }

    #[test]
    fn add_to_request() {
        let mut req = Request::post("/inbox").body(BODY).unwrap();
        super::add_digest(&mut req);

        assert_eq!(req.headers()["digest"], DIGEST);
    }

    #[test]
    fn matching() {
        let header = HeaderValue::from_static(DIGEST);
        assert!(super::matches(&header, BODY.as_bytes()));
        assert!(!super::matches(&header, b"{\"hello\": \"world!\"}"));

        let lowercase = HeaderValue::from_static(
            "sha-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
        );
        assert!(super::matches(&lowercase, BODY.as_bytes()));

        let multiple = HeaderValue::from_static(
            "SHA-512=AAAA, SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
        );
        assert!(super::matches(&multiple, BODY.as_bytes()));

        let other_algorithm = HeaderValue::from_static("SHA-512=AAAA");
        assert!(!super::matches(&other_algorithm, BODY.as_bytes()));
    }
}
