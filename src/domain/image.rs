//! Image reference encoding.
//!
//! Images are stored on items as references: either a URL or a `data:` URI holding
//! the encoded bytes. Local files are converted eagerly, so the form preview and the
//! committed item use the same representation and no upload step exists.

use super::error::{Result, ZatalogError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encodes raw image bytes as a `data:<mime>;base64,...` URI.
///
/// The MIME type is sniffed from the magic bytes.
///
/// # Errors
///
/// Returns [`ZatalogError::NotAnImage`] when the bytes do not start with a
/// recognized image signature.
///
/// # Examples
///
/// ```
/// use zatalog::domain::image::encode_data_uri;
///
/// let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
/// let uri = encode_data_uri(&png_header).unwrap();
/// assert!(uri.starts_with("data:image/png;base64,"));
///
/// assert!(encode_data_uri(b"plain text").is_err());
/// ```
pub fn encode_data_uri(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes)
        .map_err(|e| ZatalogError::NotAnImage(e.to_string()))?;
    let mime = format.to_mime_type();
    if !mime.starts_with("image/") {
        return Err(ZatalogError::NotAnImage(mime.to_string()));
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Whether a reference can be stored as-is without reading a file.
///
/// True for `http://`, `https://` and `data:image/` references.
#[must_use]
pub fn is_direct_reference(reference: &str) -> bool {
    let r = reference.trim();
    r.starts_with("http://") || r.starts_with("https://") || r.starts_with("data:image/")
}

/// Splits a comma-separated list of paths or URLs typed into the form.
///
/// A `data:` URI has a comma of its own after `;base64`; that one does not
/// split. Blank entries are dropped.
///
/// # Examples
///
/// ```
/// use zatalog::domain::image::split_references;
///
/// assert_eq!(
///     split_references(" a.png, ,https://x/b.jpg,data:image/gif;base64,R0lG "),
///     ["a.png", "https://x/b.jpg", "data:image/gif;base64,R0lG"],
/// );
/// ```
#[must_use]
pub fn split_references(input: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut data_header: Option<&str> = None;

    for part in input.split(',') {
        let part = part.trim();
        if let Some(header) = data_header.take() {
            references.push(format!("{header},{part}"));
        } else if part.starts_with("data:") {
            data_header = Some(part);
        } else if !part.is_empty() {
            references.push(part.to_string());
        }
    }

    if let Some(header) = data_header {
        references.push(header.to_string());
    }
    references
}

/// Short human-readable description of a reference for terminal display.
///
/// Data URIs are summarized by MIME type and decoded size rather than printed.
#[must_use]
pub fn describe_reference(reference: &str) -> String {
    if reference.is_empty() {
        return "(no image)".to_string();
    }

    if let Some(rest) = reference.strip_prefix("data:") {
        let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
        let mime = header.split(';').next().unwrap_or("image");
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        let bytes = (payload.len() / 4 * 3).saturating_sub(padding);
        return format!("[{mime}, {}]", format_size(bytes));
    }

    reference.to_string()
}

fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn jpeg_bytes_get_jpeg_mime() {
        let uri = encode_data_uri(&JPEG_MAGIC).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn payload_is_standard_base64_of_input() {
        let uri = encode_data_uri(&PNG_MAGIC).unwrap();
        let payload = uri.split_once(',').unwrap().1;
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        assert!(matches!(
            encode_data_uri(b"%PDF-1.7"),
            Err(ZatalogError::NotAnImage(_))
        ));
        assert!(encode_data_uri(&[]).is_err());
    }

    #[test]
    fn direct_references_are_recognized() {
        assert!(is_direct_reference("https://images.pexels.com/a.jpeg"));
        assert!(is_direct_reference("data:image/png;base64,AAAA"));
        assert!(!is_direct_reference("~/Pictures/cap.png"));
        assert!(!is_direct_reference("data:text/plain,hi"));
    }

    #[test]
    fn data_uris_are_summarized() {
        let uri = encode_data_uri(&PNG_MAGIC).unwrap();
        assert_eq!(describe_reference(&uri), "[image/png, 8 B]");
        assert_eq!(describe_reference(""), "(no image)");
        assert_eq!(describe_reference("https://x/y.jpg"), "https://x/y.jpg");
    }
}
