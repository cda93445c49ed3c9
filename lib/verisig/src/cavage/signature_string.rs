//!
//! Utilities for handling signature strings
//!

use super::{Component, SignedHeaders};
use crate::HttpRequest;
use http::HeaderValue;
use miette::Diagnostic;
use std::fmt::Write;
use thiserror::Error;

/// Signature string error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Header had an invalid value (non visible-ASCII value)
    #[error("Header `{0}` has a non-ASCII value")]
    InvalidHeaderValue(String),

    /// Headers are missing from the request
    #[error("Missing header(s): {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
}

impl From<Error> for crate::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::InvalidHeaderValue(name) => Self::InvalidHeaderValue { name },
            Error::MissingHeaders(names) => Self::MissingHeader { names },
        }
    }
}

/// Construct the signing string of a request
///
/// One `name: value` line per component, in the order of `headers`, joined by `\n` without a
/// trailing newline. Header lookups are case-insensitive and values are taken verbatim.
/// Multiple values of the same header are joined with `", "`.
///
/// Every component is checked. If any header is absent, all absent names are reported.
/// Otherwise the first header with a value that isn't visible ASCII is reported.
#[inline]
pub fn construct<R>(request: &R, headers: &SignedHeaders) -> Result<String, Error>
where
    R: HttpRequest + ?Sized,
{
    let mut signature_string = String::new();
    let mut missing = Vec::new();
    let mut invalid = None;

    for component in headers {
        match component {
            Component::RequestTarget => {
                let method = request.method().as_str().to_lowercase();
                let uri = request.uri();
                let path_and_query = uri
                    .path_and_query()
                    .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

                let _ = writeln!(signature_string, "{component}: {method} {path_and_query}");
            }
            Component::Header(name) => {
                let values = request
                    .headers()
                    .get_all(name)
                    .iter()
                    .map(HeaderValue::to_str)
                    .collect::<Result<Vec<_>, _>>();

                match values {
                    Ok(values) if values.is_empty() => missing.push(name.to_string()),
                    Ok(values) => {
                        let _ = writeln!(signature_string, "{name}: {}", values.join(", "));
                    }
                    Err(..) => {
                        invalid.get_or_insert_with(|| name.to_string());
                    }
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingHeaders(missing));
    }

    if let Some(name) = invalid {
        return Err(Error::InvalidHeaderValue(name));
    }

    // Remove the last new-line
    signature_string.pop();

    Ok(signature_string)
}
