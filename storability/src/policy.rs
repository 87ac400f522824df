//! Pluggable cache policy hooks.
//!
//! RFC 9111 leaves several storage decisions to the cache implementation:
//! which request methods it understands, whether it understands a 206/304
//! response well enough to store it, which status codes are heuristically
//! cacheable, and whether a cache extension allows storage. [`CachePolicy`]
//! models those decisions as one capability per method, with defaults
//! matching the RFC, so "no policy configured" is just [`DefaultPolicy`]
//! rather than a scatter of nullable callbacks.

use http::{Method, StatusCode};

use crate::request::CacheRequest;
use crate::response::CacheResponse;

/// HTTP status codes that RFC 9110 defines as heuristically cacheable.
///
/// Used by the default implementation of
/// [`CachePolicy::is_heuristically_cacheable`].
pub const HEURISTICALLY_CACHEABLE_STATUS_CODES: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
    StatusCode::NO_CONTENT,
    StatusCode::PARTIAL_CONTENT,
    StatusCode::MULTIPLE_CHOICES,
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::PERMANENT_REDIRECT,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
    StatusCode::GONE,
    StatusCode::URI_TOO_LONG,
    StatusCode::NOT_IMPLEMENTED,
];

/// Capability hooks consulted by
/// [`CacheConfig::can_store`](crate::CacheConfig::can_store).
///
/// Every method has a default matching RFC 9111's defaults, so an
/// implementation only overrides the decisions it wants to change.
///
/// Implementations must be side-effect-free, or at least independently safe
/// for concurrent invocation: a single [`CacheConfig`](crate::CacheConfig)
/// may evaluate many unrelated request/response pairs at once.
pub trait CachePolicy {
    /// Whether a request with this method may be answered from the cache.
    ///
    /// Defaults to `GET`, `HEAD` and `QUERY`.
    fn supports_method(&self, method: &Method) -> bool {
        *method == Method::GET || *method == Method::HEAD || method.as_str() == "QUERY"
    }

    /// Whether the cache understands this status code well enough to store
    /// a 206 or 304 response, or one carrying `must-understand`.
    ///
    /// Defaults to `false`: such responses are not stored.
    fn understands_status_code(&self, status: StatusCode) -> bool {
        let _ = status;
        false
    }

    /// Whether a response with this status code may be stored without any
    /// explicit freshness information.
    ///
    /// Defaults to the codes in [`HEURISTICALLY_CACHEABLE_STATUS_CODES`].
    fn is_heuristically_cacheable(&self, status: StatusCode) -> bool {
        HEURISTICALLY_CACHEABLE_STATUS_CODES.contains(&status)
    }

    /// Whether a cache extension marks this response as storable even though
    /// it matches none of the RFC 9111 freshness signals.
    ///
    /// Defaults to `false`: only the RFC's own criteria apply.
    fn allows_storage_by_extension(
        &self,
        request: &CacheRequest<'_>,
        response: &CacheResponse<'_>,
    ) -> bool {
        let _ = (request, response);
        false
    }
}

/// The policy used when none is configured: RFC 9111 defaults on every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl CachePolicy for DefaultPolicy {}
