//! File extension extraction.

use std::ffi::OsStr;

/// Return the dotted extension of a file name: everything from the final `.`
/// to the end, dot included, as raw bytes.
///
/// Unlike [`std::path::Path::extension`], a leading dot counts, so
/// `.vsconfig` yields `.vsconfig` rather than nothing. A name without a dot,
/// or ending in a dot, has no extension. Names need not be valid UTF-8.
#[must_use]
pub fn dotted_extension(file_name: &OsStr) -> Option<&[u8]> {
    let bytes = file_name.as_encoded_bytes();
    let idx = bytes.iter().rposition(|&b| b == b'.')?;
    let ext = &bytes[idx..];

    (ext.len() > 1).then_some(ext)
}
