//! Cache-relevant view of an HTTP request.

use http::header::{AUTHORIZATION, CACHE_CONTROL};
use http::{HeaderMap, Method, Uri};

use crate::directives::RequestDirectives;
use crate::error::DirectiveError;
use crate::header::join_values;

/// A read-only view of the request side of an exchange, used with
/// [`CacheConfig`](crate::CacheConfig) to check whether the response to it
/// may be stored.
///
/// The view borrows from the caller; nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct CacheRequest<'a> {
    /// HTTP method of the request.
    pub method: &'a Method,

    /// The requested URI.
    pub uri: &'a Uri,

    /// Request headers.
    pub headers: &'a HeaderMap,
}

impl<'a> CacheRequest<'a> {
    /// Creates a view from borrowed request metadata.
    pub fn new(method: &'a Method, uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }

    /// Creates a view over the parts of an [`http::Request`].
    pub fn from_parts(parts: &'a http::request::Parts) -> Self {
        Self::new(&parts.method, &parts.uri, &parts.headers)
    }

    /// Returns true if the request carries an `Authorization` header.
    pub fn is_authorized(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// Returns the parsed Cache-Control directives of this request.
    ///
    /// Multiple `Cache-Control` header values are joined before parsing.
    /// Parse failures for individual directives are returned alongside the
    /// best-effort result; see [`RequestDirectives::parse`].
    pub fn directives(&self) -> (RequestDirectives, Vec<DirectiveError>) {
        RequestDirectives::parse(&join_values(self.headers, &CACHE_CONTROL))
    }
}

impl<'a, B> From<&'a http::Request<B>> for CacheRequest<'a> {
    fn from(request: &'a http::Request<B>) -> Self {
        Self::new(request.method(), request.uri(), request.headers())
    }
}
