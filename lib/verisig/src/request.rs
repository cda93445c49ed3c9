//!
//! Request abstraction the signature scheme operates on
//!

use http::{HeaderMap, Method, Uri};

/// Read access to the parts of a request that take part in a signature
pub trait HttpRequest {
    /// HTTP method
    fn method(&self) -> &Method;

    /// Request URI
    fn uri(&self) -> &Uri;

    /// Header map (case-insensitive lookups)
    fn headers(&self) -> &HeaderMap;
}

impl<B> HttpRequest for http::Request<B> {
    #[inline]
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    #[inline]
    fn uri(&self) -> &Uri {
        http::Request::uri(self)
    }

    #[inline]
    fn headers(&self) -> &HeaderMap {
        http::Request::headers(self)
    }
}

impl HttpRequest for http::request::Parts {
    #[inline]
    fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
