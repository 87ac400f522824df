//! Error types for header value parsing.
//!
//! All errors in this crate are local and recoverable: the directive
//! classifiers collect them per directive and keep going, and the decision
//! engine treats an unparseable directive as absent. Nothing here is fatal.

use smol_str::SmolStr;
use thiserror::Error;

/// Error parsing a single time-valued header or directive value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// A delta-seconds value was empty.
    #[error("empty value for delta-seconds")]
    EmptyDeltaSeconds,

    /// A delta-seconds value contained non-digit characters.
    #[error("invalid value for delta-seconds")]
    InvalidDeltaSeconds,

    /// A timestamp did not match the strict RFC 1123 `Expires` format.
    #[error("invalid HTTP-date: {0}")]
    InvalidHttpDate(#[from] chrono::format::ParseError),
}

/// A [`ValueError`] attributed to the Cache-Control directive it came from.
///
/// Returned by [`RequestDirectives::parse`](crate::RequestDirectives::parse)
/// and [`ResponseDirectives::parse`](crate::ResponseDirectives::parse), which
/// collect one entry per failed directive while classification continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {name}: {source}")]
pub struct DirectiveError {
    /// Lower-cased name of the directive whose value failed to parse.
    pub name: SmolStr,

    /// The underlying value error.
    #[source]
    pub source: ValueError,
}

impl DirectiveError {
    pub(crate) fn new(name: &'static str, source: ValueError) -> Self {
        Self {
            name: SmolStr::new_static(name),
            source,
        }
    }
}
