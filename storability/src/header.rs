//! Small helpers over [`http::HeaderMap`].

use http::{HeaderMap, HeaderName};

/// Joins all values of a header field with `", "`, decoding each value
/// lossily. Returns an empty string if the field is absent.
///
/// Header values are opaque bytes as far as [`http`] is concerned; the
/// grammar layer is total over arbitrary text, so lossy decoding only ever
/// turns invalid bytes into replacement characters that parse as ordinary
/// directive text.
pub(crate) fn join_values(headers: &HeaderMap, name: &HeaderName) -> String {
    let mut joined = String::new();

    for value in headers.get_all(name) {
        if !joined.is_empty() {
            joined.push_str(", ");
        }
        joined.push_str(&String::from_utf8_lossy(value.as_bytes()));
    }

    joined
}
