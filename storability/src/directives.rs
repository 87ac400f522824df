//! Typed Cache-Control directive sets.
//!
//! [`RequestDirectives`] and [`ResponseDirectives`] classify the generic
//! directives produced by [`storability_cachecontrol::parse`] against the
//! RFC 9111 vocabulary. Classification never aborts: a bad value for one
//! directive is collected as a [`DirectiveError`] and scanning continues, so
//! a single malformed directive cannot hide the rest of the header.

use std::fmt;
use std::time::Duration;

use smol_str::SmolStr;

use crate::error::DirectiveError;
use crate::field::parse_age;

/// A non-standard Cache-Control directive, kept verbatim.
///
/// Extension semantics are caller-defined, so duplicates are preserved in
/// encounter order rather than deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDirective {
    /// Name of the directive, lower-cased. May be empty if `has_value` is true.
    pub name: SmolStr,

    /// Value of the directive, if any. May be empty. Check `has_value` to
    /// differentiate between an empty and no value.
    pub value: String,

    /// True if a value is set.
    pub has_value: bool,
}

impl fmt::Display for ExtensionDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_value {
            write!(f, "{}=\"{}\"", self.name, self.value)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Parsed cache directives from a Cache-Control header of a request.
///
/// Duplicate occurrences of the same directive follow last-write-wins, with
/// one exception: a later occurrence whose value fails to parse does not
/// erase an earlier successfully parsed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDirectives {
    /// <https://www.rfc-editor.org/rfc/rfc9111#name-max-age>
    pub max_age: Option<Duration>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-max-stale>
    pub max_stale: Option<Duration>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-min-fresh>
    pub min_fresh: Option<Duration>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-cache>
    pub no_cache: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-store>
    pub no_store: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-transform>
    pub no_transform: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-only-if-cached>
    pub only_if_cached: bool,

    /// All non-standard directives in encounter order, duplicates included.
    pub extensions: Vec<ExtensionDirective>,
}

impl RequestDirectives {
    /// Parses a Cache-Control request header.
    ///
    /// Classification is error-tolerant: every recognized directive that
    /// fails to parse contributes one entry to the returned error list, and
    /// the rest of the header is still interpreted.
    pub fn parse(header: &str) -> (Self, Vec<DirectiveError>) {
        let mut directives = Self::default();
        let mut errors = Vec::new();

        for directive in storability_cachecontrol::parse(header) {
            let name = directive.name.to_ascii_lowercase();

            match name.as_str() {
                "max-age" => match parse_age(&directive.value) {
                    Ok(age) => directives.max_age = Some(age),
                    Err(err) => errors.push(DirectiveError::new("max-age", err)),
                },
                "max-stale" => match parse_age(&directive.value) {
                    Ok(age) => directives.max_stale = Some(age),
                    Err(err) => errors.push(DirectiveError::new("max-stale", err)),
                },
                "min-fresh" => match parse_age(&directive.value) {
                    Ok(age) => directives.min_fresh = Some(age),
                    Err(err) => errors.push(DirectiveError::new("min-fresh", err)),
                },
                "no-cache" => directives.no_cache = true,
                "no-store" => directives.no_store = true,
                "no-transform" => directives.no_transform = true,
                "only-if-cached" => directives.only_if_cached = true,
                _ => directives.extensions.push(ExtensionDirective {
                    name: name.into(),
                    value: directive.value.into_owned(),
                    has_value: directive.has_value,
                }),
            }
        }

        (directives, errors)
    }
}

impl fmt::Display for RequestDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Directives::new(f);

        if let Some(age) = self.max_age {
            out.duration("max-age", age)?;
        }
        if let Some(age) = self.max_stale {
            out.duration("max-stale", age)?;
        }
        if let Some(age) = self.min_fresh {
            out.duration("min-fresh", age)?;
        }
        if self.no_cache {
            out.flag("no-cache")?;
        }
        if self.no_store {
            out.flag("no-store")?;
        }
        if self.no_transform {
            out.flag("no-transform")?;
        }
        if self.only_if_cached {
            out.flag("only-if-cached")?;
        }
        for ext in &self.extensions {
            out.extension(ext)?;
        }

        Ok(())
    }
}

/// Parsed cache directives from a Cache-Control header of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDirectives {
    /// <https://www.rfc-editor.org/rfc/rfc9111#name-max-age-2>
    pub max_age: Option<Duration>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-must-revalidate>
    pub must_revalidate: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-must-understand>
    pub must_understand: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-cache-2>
    pub no_cache: bool,

    /// Header names set via the `no-cache` directive, when it carried a value.
    ///
    /// `None` if the last `no-cache` directive had no value; otherwise
    /// `Some`, even if the list is empty.
    pub no_cache_headers: Option<Vec<SmolStr>>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-store-2>
    pub no_store: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-no-transform-2>
    pub no_transform: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-private>
    pub private: bool,

    /// Header names set via the `private` directive, when it carried a value.
    ///
    /// `None` if the last `private` directive had no value; otherwise `Some`,
    /// even if the list is empty.
    pub private_headers: Option<Vec<SmolStr>>,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-proxy-revalidate>
    pub proxy_revalidate: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-public>
    pub public: bool,

    /// <https://www.rfc-editor.org/rfc/rfc9111#name-s-maxage>
    pub s_maxage: Option<Duration>,

    /// All non-standard directives in encounter order, duplicates included.
    pub extensions: Vec<ExtensionDirective>,
}

impl ResponseDirectives {
    /// Parses a Cache-Control response header.
    ///
    /// Classification is error-tolerant: every recognized directive that
    /// fails to parse contributes one entry to the returned error list, and
    /// the rest of the header is still interpreted.
    pub fn parse(header: &str) -> (Self, Vec<DirectiveError>) {
        let mut directives = Self::default();
        let mut errors = Vec::new();

        for directive in storability_cachecontrol::parse(header) {
            let name = directive.name.to_ascii_lowercase();

            match name.as_str() {
                "max-age" => match parse_age(&directive.value) {
                    Ok(age) => directives.max_age = Some(age),
                    Err(err) => errors.push(DirectiveError::new("max-age", err)),
                },
                "must-revalidate" => directives.must_revalidate = true,
                "must-understand" => directives.must_understand = true,
                "no-cache" => {
                    directives.no_cache = true;
                    // A restated no-cache without a value resets the header
                    // scope back to unrestricted.
                    directives.no_cache_headers = directive
                        .has_value
                        .then(|| header_names(&directive.value));
                }
                "no-store" => directives.no_store = true,
                "no-transform" => directives.no_transform = true,
                "private" => {
                    directives.private = true;
                    directives.private_headers = directive
                        .has_value
                        .then(|| header_names(&directive.value));
                }
                "proxy-revalidate" => directives.proxy_revalidate = true,
                "public" => directives.public = true,
                "s-maxage" => match parse_age(&directive.value) {
                    Ok(age) => directives.s_maxage = Some(age),
                    Err(err) => errors.push(DirectiveError::new("s-maxage", err)),
                },
                _ => directives.extensions.push(ExtensionDirective {
                    name: name.into(),
                    value: directive.value.into_owned(),
                    has_value: directive.has_value,
                }),
            }
        }

        (directives, errors)
    }
}

impl fmt::Display for ResponseDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Directives::new(f);

        if let Some(age) = self.max_age {
            out.duration("max-age", age)?;
        }
        if self.must_revalidate {
            out.flag("must-revalidate")?;
        }
        if self.must_understand {
            out.flag("must-understand")?;
        }
        if self.no_cache {
            out.scoped("no-cache", self.no_cache_headers.as_deref())?;
        }
        if self.no_store {
            out.flag("no-store")?;
        }
        if self.no_transform {
            out.flag("no-transform")?;
        }
        if self.private {
            out.scoped("private", self.private_headers.as_deref())?;
        }
        if self.proxy_revalidate {
            out.flag("proxy-revalidate")?;
        }
        if self.public {
            out.flag("public")?;
        }
        if let Some(age) = self.s_maxage {
            out.duration("s-maxage", age)?;
        }
        for ext in &self.extensions {
            out.extension(ext)?;
        }

        Ok(())
    }
}

/// Splits a `no-cache`/`private` directive value on whitespace into a list
/// of header names.
fn header_names(value: &str) -> Vec<SmolStr> {
    value.split_ascii_whitespace().map(SmolStr::new).collect()
}

/// Comma-separated writer shared by the `Display` implementations.
struct Directives<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl<'a, 'b> Directives<'a, 'b> {
    fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, first: true }
    }

    fn separate(&mut self) -> fmt::Result {
        if !self.first {
            self.f.write_str(", ")?;
        }
        self.first = false;
        Ok(())
    }

    fn flag(&mut self, name: &str) -> fmt::Result {
        self.separate()?;
        self.f.write_str(name)
    }

    fn duration(&mut self, name: &str, value: Duration) -> fmt::Result {
        self.separate()?;
        write!(self.f, "{name}={}", value.as_secs())
    }

    fn scoped(&mut self, name: &str, headers: Option<&[SmolStr]>) -> fmt::Result {
        self.separate()?;
        match headers {
            // The quoted-string form is required for a list, even when a
            // single token would technically do.
            Some(headers) if !headers.is_empty() => {
                write!(self.f, "{name}=\"{}\"", headers.join(" "))
            }
            _ => self.f.write_str(name),
        }
    }

    fn extension(&mut self, ext: &ExtensionDirective) -> fmt::Result {
        self.separate()?;
        write!(self.f, "{ext}")
    }
}
