//! Request path normalization for inspection.
//!
//! Upstreams percent-decode the path before routing, so the shield and the
//! gate must look at the decoded form too. The raw form is still checked
//! for double-encoded traversal.

use std::borrow::Cow;

/// Percent-decode `path` once. Invalid UTF-8 is replaced, not rejected.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    if !path.contains('%') {
        return Cow::Borrowed(path);
    }
    let bytes = urlencoding::decode_binary(path.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// True if the decoded path has a `..` segment (`/` or `\` separated).
pub fn has_parent_segment(path: &str) -> bool {
    decode_path(path)
        .split(['/', '\\'])
        .any(|segment| segment == "..")
}
