//! File extensions for declared content types

use mime::Mime;

use crate::types::{UploadError, UploadResult};

/// Known content types and their extensions
///
/// Extensions are listed in lexical order per type and the first one wins, so the
/// mapping is stable across hosts regardless of their local `mime.types`.
const EXTENSIONS: &[(&str, &[&str])] = &[
    ("image/avif", &[".avif"]),
    ("image/bmp", &[".bmp"]),
    ("image/gif", &[".gif"]),
    ("image/heic", &[".heic"]),
    ("image/heif", &[".heif"]),
    ("image/jpeg", &[".jpe", ".jpeg", ".jpg"]),
    ("image/png", &[".png"]),
    ("image/svg+xml", &[".svg", ".svgz"]),
    ("image/tiff", &[".tif", ".tiff"]),
    ("image/vnd.microsoft.icon", &[".ico"]),
    ("image/webp", &[".webp"]),
    ("image/x-icon", &[".ico"]),
    ("image/x-ms-bmp", &[".bmp"]),
];

/// Returns every extension known for a content type
///
/// Parameters such as `charset` are ignored and matching is case-insensitive.
#[must_use]
pub fn extensions_by_type(content_type: &str) -> Option<&'static [&'static str]> {
    let mime: Mime = content_type.trim().parse().ok()?;
    let essence = mime.essence_str();

    EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(essence))
        .map(|(_, extensions)| *extensions)
}

/// Resolves the extension appended to object keys for a content type
///
/// # Errors
///
/// Returns `UploadError::UnsupportedContentType` if the type is unknown or is not
/// a valid MIME type
pub fn resolve_extension(content_type: &str) -> UploadResult<&'static str> {
    extensions_by_type(content_type)
        .and_then(|extensions| extensions.first().copied())
        .ok_or_else(|| UploadError::UnsupportedContentType(content_type.to_string()))
}
