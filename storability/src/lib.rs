#![warn(missing_docs)]
//! # storability
//!
//! Cacheability decisions for HTTP exchanges, based on RFC 9111.
//!
//! This crate answers one question: **may this response be stored by a
//! cache, and under what header constraints?** It is a decision library,
//! not a cache — it never holds response bytes, never evicts and never
//! serves anything. Parsing the `Cache-Control` grammar itself lives in the
//! companion crate [`storability_cachecontrol`]; this crate classifies the
//! parsed directives against the RFC vocabulary and evaluates the storage
//! preconditions of RFC 9111 §3.
//!
//! ## Overview
//!
//! - [`CacheConfig`] describes the cache (shared or private, plus a few
//!   toggles and the pluggable [`CachePolicy`] hooks) and exposes
//!   [`CacheConfig::can_store`] and
//!   [`CacheConfig::remove_unstorable_headers`].
//! - [`CacheRequest`] and [`CacheResponse`] are read-only views over
//!   caller-owned [`http`] types.
//! - [`RequestDirectives`] and [`ResponseDirectives`] are the typed
//!   directive sets, parsed error-tolerantly: bad values are collected as
//!   [`DirectiveError`]s and never stop classification.
//!
//! Everything is synchronous, allocation-light and safe to call
//! concurrently; a single [`CacheConfig`] can serve any number of
//! simultaneous evaluations.
//!
//! ## Example
//!
//! ```
//! use http::{HeaderMap, Method, StatusCode, Uri};
//! use storability::{CacheConfig, CacheRequest, CacheResponse};
//!
//! let method = Method::GET;
//! let uri = Uri::from_static("https://example.com/index.html");
//! let request_headers = HeaderMap::new();
//! let request = CacheRequest::new(&method, &uri, &request_headers);
//!
//! let mut response_headers = HeaderMap::new();
//! response_headers.insert("cache-control", "public, max-age=3600".parse().unwrap());
//! let response = CacheResponse::new(StatusCode::OK, &response_headers);
//!
//! assert!(CacheConfig::shared().can_store(&request, &response));
//! ```

pub mod config;
pub mod directives;
pub mod error;
pub mod field;
mod header;
pub mod policy;
pub mod request;
pub mod response;

pub use config::CacheConfig;
pub use directives::{ExtensionDirective, RequestDirectives, ResponseDirectives};
pub use error::{DirectiveError, ValueError};
pub use field::{parse_age, parse_delta_seconds, parse_expires};
pub use policy::{CachePolicy, DefaultPolicy, HEURISTICALLY_CACHEABLE_STATUS_CODES};
pub use request::CacheRequest;
pub use response::CacheResponse;
