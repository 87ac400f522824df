//! Cache configuration and the storage decision itself.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::header::{CACHE_CONTROL, CONNECTION, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION};
use http::{HeaderMap, HeaderName, StatusCode};
use tracing::trace;

use crate::directives::ResponseDirectives;
use crate::header::join_values;
use crate::policy::{CachePolicy, DefaultPolicy};
use crate::request::CacheRequest;
use crate::response::CacheResponse;

/// Characteristics of a cache, from which cacheability is calculated.
///
/// A `CacheConfig` is a plain value: it holds the shared/private flag, a few
/// behavior toggles and a [`CachePolicy`], and keeps no state between calls.
/// A single instance (it is `Clone`, and the policy is shared behind an
/// [`Arc`]) may evaluate unrelated exchanges from many call sites at once.
///
/// # Example
///
/// ```
/// use http::{HeaderMap, Method, StatusCode, Uri};
/// use storability::{CacheConfig, CacheRequest, CacheResponse};
///
/// let method = Method::GET;
/// let uri = Uri::from_static("https://example.com/");
/// let request_headers = HeaderMap::new();
/// let request = CacheRequest::new(&method, &uri, &request_headers);
///
/// let mut response_headers = HeaderMap::new();
/// response_headers.insert("cache-control", "private, max-age=60".parse().unwrap());
/// let response = CacheResponse::new(StatusCode::OK, &response_headers);
///
/// // The same exchange, judged once per cache mode.
/// assert!(!CacheConfig::shared().can_store(&request, &response));
/// assert!(CacheConfig::private().can_store(&request, &response));
/// ```
#[derive(Clone)]
pub struct CacheConfig {
    private: bool,
    respect_private_headers: bool,
    store_proxy_headers: bool,
    ignore_request_no_store: bool,
    policy: Arc<dyn CachePolicy + Send + Sync>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::shared()
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("private", &self.private)
            .field("respect_private_headers", &self.respect_private_headers)
            .field("store_proxy_headers", &self.store_proxy_headers)
            .field("ignore_request_no_store", &self.ignore_request_no_store)
            .finish_non_exhaustive()
    }
}

impl CacheConfig {
    /// Configuration for a shared cache, as understood by RFC 9111.
    pub fn shared() -> Self {
        Self {
            private: false,
            respect_private_headers: false,
            store_proxy_headers: false,
            ignore_request_no_store: false,
            policy: Arc::new(DefaultPolicy),
        }
    }

    /// Configuration for a private cache, bound to a single user.
    pub fn private() -> Self {
        Self {
            private: true,
            ..Self::shared()
        }
    }

    /// Returns true if this configuration describes a private cache.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Replaces the [`CachePolicy`] hooks consulted by [`can_store`].
    ///
    /// [`can_store`]: CacheConfig::can_store
    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: CachePolicy + Send + Sync + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }

    /// Allows a shared cache to store responses marked `private` as long as
    /// the directive names at least one header in its value.
    ///
    /// Also causes [`remove_unstorable_headers`] to remove the headers named
    /// by the `private` directive (but not those named by `no-cache`, which
    /// remain usable depending on the request).
    ///
    /// When disabled, a valued `private` directive is treated as if it had
    /// no value.
    ///
    /// [`remove_unstorable_headers`]: CacheConfig::remove_unstorable_headers
    pub fn respect_private_headers(mut self, enabled: bool) -> Self {
        self.respect_private_headers = enabled;
        self
    }

    /// Keeps the `Proxy-Authenticate`, `Proxy-Authentication-Info` and
    /// `Proxy-Authorization` headers in [`remove_unstorable_headers`], for
    /// caches that incorporate the proxy identity into their cache key.
    ///
    /// [`remove_unstorable_headers`]: CacheConfig::remove_unstorable_headers
    pub fn store_proxy_headers(mut self, enabled: bool) -> Self {
        self.store_proxy_headers = enabled;
        self
    }

    /// Disables the check of the `no-store` Cache-Control request directive.
    ///
    /// RFC 9111 describes the directive as preventing storage, but the steps
    /// for deciding whether a response can be stored never mention it.
    /// [`can_store`] respects it by default; caches may want to ignore it.
    ///
    /// [`can_store`]: CacheConfig::can_store
    pub fn ignore_request_no_store(mut self, enabled: bool) -> Self {
        self.ignore_request_no_store = enabled;
        self
    }

    /// Checks whether a response to the given request may be stored.
    ///
    /// This evaluates the preconditions of RFC 9111 §3 ("Storing Responses
    /// in Caches") in order, short-circuiting on the first one that fails.
    /// It is a pure function of its inputs: malformed headers degrade to
    /// "directive absent" through the error-tolerant classifier, and no
    /// input is ever mutated.
    pub fn can_store(&self, request: &CacheRequest<'_>, response: &CacheResponse<'_>) -> bool {
        // A cache MUST NOT store a response to a request unless:

        // - the request method is understood by the cache;
        if !self.policy.supports_method(request.method) {
            trace!(method = %request.method, "request method not supported");
            return false;
        }

        // - the response status code is final (see Section 15 of [HTTP]);
        if response.status.as_u16() < 200 {
            trace!(status = %response.status, "response status is not final");
            return false;
        }

        let (directives, _) = response.directives();

        // - if the response status code is 206 or 304, or the
        //   must-understand cache directive (see Section 5.2.2.3) is
        //   present: the cache understands the response status code;
        if (response.status == StatusCode::PARTIAL_CONTENT
            || response.status == StatusCode::NOT_MODIFIED
            || directives.must_understand)
            && !self.policy.understands_status_code(response.status)
        {
            trace!(status = %response.status, "response status not understood");
            return false;
        }

        // - the no-store cache directive is not present in the response
        //   (see Section 5.2.2.5);
        if directives.no_store {
            trace!("response carries no-store");
            return false;
        }

        // - if the cache is shared: the private response directive is either
        //   not present or allows a shared cache to store a modified
        //   response (see Section 5.2.2.7);
        if !self.private
            && directives.private
            && (!self.respect_private_headers
                || directives.private_headers.as_ref().is_none_or(Vec::is_empty))
        {
            trace!("response is private and the cache is shared");
            return false;
        }

        // - if the cache is shared: the Authorization header field is not
        //   present in the request (see Section 11.6.2 of [HTTP]) or a
        //   response directive is present that explicitly allows shared
        //   caching (see Section 3.5); and
        if !self.private
            && request.is_authorized()
            && !directives.must_revalidate
            && !directives.public
            && !positive(directives.s_maxage)
        {
            trace!("request is authorized and the response does not allow shared caching");
            return false;
        }

        // - the response contains at least one of the following:
        let has_freshness_signal =
            // a public response directive (see Section 5.2.2.9);
            directives.public
            // a private response directive, if the cache is not shared
            // (see Section 5.2.2.7);
            || (self.private && directives.private)
            // an Expires header field (see Section 5.3);
            || matches!(response.expires(), Some(Ok(_)))
            // a max-age response directive (see Section 5.2.2.1);
            || positive(directives.max_age)
            // if the cache is shared: an s-maxage response directive
            // (see Section 5.2.2.10);
            || (!self.private && positive(directives.s_maxage))
            // a cache extension that allows it to be cached
            // (see Section 5.2.3); or
            || self.policy.allows_storage_by_extension(request, response)
            // a status code that is defined as heuristically cacheable
            // (see Section 4.2.2).
            || self.policy.is_heuristically_cacheable(response.status);

        if !has_freshness_signal {
            trace!("response carries no freshness signal");
            return false;
        }

        // Not actually part of "3. Storing Responses in Caches", so it is
        // applied last and can be switched off.
        if !self.ignore_request_no_store {
            let (directives, _) = request.directives();

            if directives.no_store {
                trace!("request carries no-store");
                return false;
            }
        }

        true
    }

    /// Removes response headers that must not be stored.
    ///
    /// Per RFC 9111 §3.1, caches must store all received response header
    /// fields, including unrecognized ones, with a few exceptions:
    ///
    /// - the `Connection` header and every field it names;
    /// - the fields named by a value-bearing `private` directive, when
    ///   [`respect_private_headers`](CacheConfig::respect_private_headers)
    ///   is enabled;
    /// - the `Proxy-Authenticate`, `Proxy-Authentication-Info` and
    ///   `Proxy-Authorization` fields, unless
    ///   [`store_proxy_headers`](CacheConfig::store_proxy_headers) is
    ///   enabled.
    pub fn remove_unstorable_headers(&self, headers: &mut HeaderMap) {
        // The Connection header and the fields it names are required by
        // Section 7.6.1 of [HTTP] to be removed before forwarding the
        // message, which may be done before storage.
        let connected: Vec<String> = headers
            .get_all(CONNECTION)
            .iter()
            .flat_map(|value| {
                String::from_utf8_lossy(value.as_bytes())
                    .split(',')
                    .map(|name| name.trim().to_ascii_lowercase())
                    .collect::<Vec<_>>()
            })
            .collect();

        headers.remove(CONNECTION);

        for name in connected {
            if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
                trace!(header = %name, "removing header named by Connection");
                headers.remove(name);
            }
        }

        if self.respect_private_headers {
            // The private cache directive can have arguments that prevent
            // storage of the named header fields by shared caches.
            let (directives, _) = ResponseDirectives::parse(&join_values(headers, &CACHE_CONTROL));

            for name in directives.private_headers.iter().flatten() {
                if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
                    trace!(header = %name, "removing header named by private directive");
                    headers.remove(name);
                }
            }
        }

        if !self.store_proxy_headers {
            // Fields specific to the proxy a cache uses when forwarding must
            // not be stored unless the proxy identity is part of the cache
            // key. Effectively this is limited to the three Proxy-*
            // authentication fields.
            headers.remove(PROXY_AUTHENTICATE);
            headers.remove(HeaderName::from_static("proxy-authentication-info"));
            headers.remove(PROXY_AUTHORIZATION);
        }
    }
}

fn positive(duration: Option<Duration>) -> bool {
    duration.is_some_and(|d| !d.is_zero())
}
