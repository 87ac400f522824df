//! Cache-relevant view of an HTTP response.

use std::time::Duration;

use chrono::{DateTime, Utc};
use http::header::{AGE, CACHE_CONTROL, EXPIRES, VARY};
use http::{HeaderMap, StatusCode};
use smol_str::SmolStr;

use crate::directives::ResponseDirectives;
use crate::error::{DirectiveError, ValueError};
use crate::field::{parse_age, parse_expires};
use crate::header::join_values;

/// A read-only view of the response side of an exchange, used with
/// [`CacheConfig`](crate::CacheConfig) to check whether it may be stored.
///
/// The view borrows from the caller; the only mutation anywhere in this
/// crate goes through
/// [`CacheConfig::remove_unstorable_headers`](crate::CacheConfig::remove_unstorable_headers).
#[derive(Debug, Clone, Copy)]
pub struct CacheResponse<'a> {
    /// Final HTTP status code of the response.
    pub status: StatusCode,

    /// Response headers.
    pub headers: &'a HeaderMap,

    /// Response trailers, if any were received.
    pub trailers: Option<&'a HeaderMap>,
}

impl<'a> CacheResponse<'a> {
    /// Creates a view from borrowed response metadata.
    pub fn new(status: StatusCode, headers: &'a HeaderMap) -> Self {
        Self {
            status,
            headers,
            trailers: None,
        }
    }

    /// Attaches received trailers to the view.
    pub fn with_trailers(mut self, trailers: &'a HeaderMap) -> Self {
        self.trailers = Some(trailers);
        self
    }

    /// Creates a view over the parts of an [`http::Response`].
    pub fn from_parts(parts: &'a http::response::Parts) -> Self {
        Self::new(parts.status, &parts.headers)
    }

    /// Returns the parsed Cache-Control directives of this response.
    ///
    /// Multiple `Cache-Control` header values are joined before parsing.
    /// Parse failures for individual directives are returned alongside the
    /// best-effort result; see [`ResponseDirectives::parse`].
    pub fn directives(&self) -> (ResponseDirectives, Vec<DirectiveError>) {
        ResponseDirectives::parse(&join_values(self.headers, &CACHE_CONTROL))
    }

    /// Returns the response age from the `Age` header, or `None` if the
    /// header is absent.
    pub fn age(&self) -> Option<Result<Duration, ValueError>> {
        if !self.headers.contains_key(AGE) {
            return None;
        }
        Some(parse_age(&join_values(self.headers, &AGE)))
    }

    /// Returns the time at which the response expires from the `Expires`
    /// header, or `None` if the header is absent.
    pub fn expires(&self) -> Option<Result<DateTime<Utc>, ValueError>> {
        if !self.headers.contains_key(EXPIRES) {
            return None;
        }
        Some(parse_expires(&join_values(self.headers, &EXPIRES)))
    }

    /// Returns the header names listed in the `Vary` header, split on
    /// commas, trimmed, lower-cased, deduplicated and sorted.
    pub fn vary(&self) -> Vec<SmolStr> {
        let mut names = Vec::new();

        for value in self.headers.get_all(VARY) {
            let value = String::from_utf8_lossy(value.as_bytes());
            for name in value.split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    names.push(SmolStr::new(name.to_ascii_lowercase()));
                }
            }
        }

        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<'a, B> From<&'a http::Response<B>> for CacheResponse<'a> {
    fn from(response: &'a http::Response<B>) -> Self {
        Self::new(response.status(), response.headers())
    }
}
