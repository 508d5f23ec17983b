//! URL sniffing and file naming for remote references.
//!
//! The image check is a best-effort look at the URL shape only; the content
//! type of the downloaded response is not used to veto the drop.

use regex::Regex;
use std::sync::LazyLock;

/// Content type used when the response does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Base name used when the URL path carries no usable segment.
pub const FALLBACK_FILE_NAME: &str = "downloaded-image";

const IMAGE_KEYWORDS: &[&str] = &["image", "img", "photo", "picture"];

/// Image extension at the end of the path, optionally followed by a query or fragment.
static IMAGE_EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|gif|webp|svg|bmp|avif|ico|tiff?)([?#].*)?$")
        .expect("image extension regex is valid")
});

pub fn has_web_scheme(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether `url` looks like it points at an image.
///
/// Requires an `http(s)` scheme, then either a recognised image extension or
/// one of the keywords `image`, `img`, `photo`, `picture` anywhere in the URL.
pub fn looks_like_image_url(url: &str) -> bool {
    let url = url.trim();
    if !has_web_scheme(url) {
        return false;
    }
    if IMAGE_EXTENSION_RE.is_match(url) {
        return true;
    }
    let lower = url.to_ascii_lowercase();
    IMAGE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Synthesizes a file name for a downloaded resource.
///
/// Uses the last non-empty path segment (query and fragment stripped,
/// percent-decoded when valid UTF-8). When the name has no extension, one is
/// guessed from `content_type`.
pub fn derive_file_name(url: &str, content_type: &str) -> String {
    let base = last_path_segment(url).unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
    if base.contains('.') {
        return base;
    }
    match extension_for(content_type) {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    let path = match without_query.split_once("://") {
        // Drop the authority so a bare host never becomes the file name.
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
        None => without_query,
    };

    let segment = path.rsplit('/').find(|s| !s.is_empty())?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let cleaned: String = decoded
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match essence.as_str() {
        // mime_guess lists "jpe" first for jpeg.
        "image/jpeg" => Some("jpg"),
        "image/svg+xml" => Some("svg"),
        "" | DEFAULT_CONTENT_TYPE => None,
        other => mime_guess::get_mime_extensions_str(other)?.first().copied(),
    }
}
