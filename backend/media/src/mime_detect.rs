//! Extension-based image type detection.
//!
//! Used by the scanner to decide which directory entries are images.

use std::path::Path;

/// Extensions accepted when no override is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Lowercased final extension of a file name, without the dot.
///
/// A leading-dot name such as `.png` counts as having the `png` extension.
pub fn extension_of(file_name: &str) -> Option<String> {
    if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
        return Some(ext.to_lowercase());
    }
    file_name
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty() && !rest.contains('.'))
        .map(str::to_lowercase)
}

/// Whether `file_name` ends (case-insensitively) in one of `accepted`.
///
/// `accepted` entries are expected lowercase and without a leading dot.
pub fn has_extension(file_name: &str, accepted: &[String]) -> bool {
    match extension_of(file_name) {
        Some(ext) => accepted.iter().any(|a| *a == ext),
        None => false,
    }
}

/// MIME type for common image extensions.
pub fn detect_image_mime(file_name: &str) -> &'static str {
    let ext = extension_of(file_name).unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "pbm"          => "image/x-portable-bitmap",
        "pgm"          => "image/x-portable-graymap",
        "ppm"          => "image/x-portable-pixmap",
        _              => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn matches_case_insensitively() {
        let accepted = defaults();
        assert!(has_extension("photo.PNG", &accepted));
        assert!(has_extension("scan.JpEg", &accepted));
        assert!(!has_extension("notes.txt", &accepted));
        assert!(!has_extension("png", &accepted));
    }

    #[test]
    fn hidden_file_named_like_extension() {
        assert_eq!(extension_of(".png").as_deref(), Some("png"));
        assert_eq!(extension_of(".config.d"), Some("d".to_string()));
        assert_eq!(extension_of("."), None);
    }

    #[test]
    fn detects_jpeg() {
        assert_eq!(detect_image_mime("photo.JPG"), "image/jpeg");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(detect_image_mime("file.xyz"), "application/octet-stream");
    }
}
