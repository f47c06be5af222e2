//! `file://` URLs for media references.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{ExportError, ExportResult};

/// Build a percent-encoded `file://` URL for an absolute path.
///
/// Unreserved characters and `/` pass through; every other byte of the
/// path is written as `%XX`. On Unix the path's raw bytes are encoded, so
/// names that are not valid UTF-8 survive unchanged.
pub fn file_url(path: &Path) -> ExportResult<String> {
    if !path.is_absolute() {
        return Err(ExportError::RelativeMediaPath {
            path: path.to_path_buf(),
        });
    }

    let raw = path_bytes(path);
    let mut url = String::with_capacity(raw.len() + 7);
    url.push_str("file://");
    for &byte in raw.iter() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                url.push(byte as char)
            }
            _ => url.push_str(&format!("%{byte:02X}")),
        }
    }
    Ok(url)
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
