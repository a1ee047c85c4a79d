//! Delivery URL derivation.
//!
//! Stored objects are served by a CDN sitting in front of the bucket. The
//! delivery URL for a key is the CDN base URL joined with the key encoded as
//! a single path segment, so a key like `a/b.png` never turns into a nested
//! path on the CDN side.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Cache policy attached to delivery redirects (one day, immutable).
pub const CACHE_CONTROL: &str = "public, max-age=86400, immutable";

/// URI component encode set: everything except alphanumerics and `-_.!~*'()`.
const KEY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Derive the delivery URL for `key` under `base_url`.
///
/// Exactly one trailing `/` is stripped from `base_url`. The key is
/// percent-encoded as one opaque segment (`/` included).
#[must_use]
pub fn derive_url(key: &str, base_url: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}/{}", encode_key(key))
}

/// Percent-encode a storage key as a single URL path segment.
#[must_use]
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, &KEY_ENCODE_SET).to_string()
}
