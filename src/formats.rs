//! Known clipboard format tables and payload decoding.
//!
//! Format identifiers are opaque platform strings (MIME types on Wayland and
//! X11, registered names on Windows, UTIs on macOS). The only thing the core
//! does with them is membership tests against the tables below.

/// Family a format identifier belongs to, by table lookup only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    /// Plain text, URLs and other string-valued formats
    PlainText,
    /// HTML, RTF, CSV and Markdown
    RichText,
    /// File drop lists and file URI lists
    FileList,
    /// Bitmaps and encoded images
    Image,
    /// Anything not in the tables
    Other,
}

const PLAIN_TEXT_FORMATS: &[&str] = &[
    "text/plain",
    "utf8_string",
    "string",
    "text",
    "unicodetext",
    "oemtext",
    "public.utf8-plain-text",
    "public.utf16-plain-text",
    "public.plain-text",
    "public.text",
    "nsstringpboardtype",
    "public.url",
    "public.file-url",
    "image/svg+xml",
    "text/x-moz-url",
    "uniformresourcelocator",
    "uniformresourcelocatorw",
];

const RICH_TEXT_FORMATS: &[&str] = &[
    "text/html",
    "html",
    "html format",
    "public.html",
    "text/rtf",
    "text/richtext",
    "application/rtf",
    "rtf",
    "rich text format",
    "public.rtf",
    "text/markdown",
    "text/x-markdown",
    "net.daringfireball.markdown",
    "text/csv",
    "csv",
    "public.comma-separated-values-text",
];

const FILE_LIST_FORMATS: &[&str] = &[
    "text/uri-list",
    "x-special/gnome-copied-files",
    "x-special/mate-copied-files",
    "filedrop",
    "filenamew",
    "filename",
    "cf_hdrop",
    "nsfilenamespboardtype",
];

const IMAGE_FORMATS: &[&str] = &[
    "png",
    "bitmap",
    "deviceindependentbitmap",
    "cf_dib",
    "cf_dibv5",
    "format17",
    "public.png",
    "public.tiff",
    "public.jpeg",
];

/// Windows in-memory bitmaps that carry no BMP file header
const DIB_FORMATS: &[&str] = &[
    "bitmap",
    "deviceindependentbitmap",
    "cf_dib",
    "cf_dibv5",
    "format17",
];

const UTF16_FORMATS: &[&str] = &[
    "unicodetext",
    "uniformresourcelocatorw",
    "public.utf16-plain-text",
    "filenamew",
];

/// Lowercase, drop whitespace around MIME parameters
fn normalize(format_id: &str) -> String {
    format_id
        .split(';')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(";")
        .to_ascii_lowercase()
}

/// MIME base type without parameters
fn base_type(normalized: &str) -> &str {
    normalized.split(';').next().unwrap_or(normalized)
}

impl FormatFamily {
    pub fn of(format_id: &str) -> Self {
        let normalized = normalize(format_id);
        let base = base_type(&normalized);

        if PLAIN_TEXT_FORMATS.contains(&base) {
            FormatFamily::PlainText
        } else if RICH_TEXT_FORMATS.contains(&base) {
            FormatFamily::RichText
        } else if FILE_LIST_FORMATS.contains(&base) {
            FormatFamily::FileList
        } else if base.starts_with("image/") || IMAGE_FORMATS.contains(&base) {
            FormatFamily::Image
        } else {
            FormatFamily::Other
        }
    }

    /// Member of the known-textual set
    pub fn is_textual(self) -> bool {
        matches!(self, FormatFamily::PlainText | FormatFamily::RichText)
    }
}

/// Windows DIB formats need a synthesized BMP header before decoding
pub fn is_dib_format(format_id: &str) -> bool {
    DIB_FORMATS.contains(&base_type(&normalize(format_id)))
}

fn is_utf16_format(format_id: &str) -> bool {
    let normalized = normalize(format_id);
    normalized.contains("utf-16")
        || normalized.contains("utf16")
        || UTF16_FORMATS.contains(&base_type(&normalized))
}

/// Attempt to decode a byte payload as text for the given format.
///
/// UTF-16 formats honour a byte order mark and default to little-endian;
/// everything else must be valid UTF-8. Trailing NUL terminators are dropped.
/// Returns `None` when the bytes are not valid in the chosen encoding.
pub fn decode_text(format_id: &str, bytes: &[u8]) -> Option<String> {
    let text = if is_utf16_format(format_id) {
        decode_utf16(bytes)?
    } else {
        std::str::from_utf8(bytes).ok()?.to_string()
    };

    Some(text.trim_end_matches('\0').to_string())
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };

    if body.len() % 2 != 0 {
        return None;
    }

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Decode a file-list payload into paths, in platform order.
///
/// Returns `None` when the payload is not a file list (an empty list, a
/// non-file URI, or undecodable bytes).
pub fn decode_file_list(format_id: &str, bytes: &[u8]) -> Option<Vec<String>> {
    let base = normalize(format_id);
    let paths = match base_type(&base) {
        "filedrop" | "cf_hdrop" if !looks_like_uri_list(bytes) => parse_hdrop(bytes)?,
        "filenamew" => vec![decode_utf16(bytes)?.trim_end_matches('\0').to_string()],
        "filename" => vec![std::str::from_utf8(bytes).ok()?.trim_end_matches('\0').to_string()],
        _ => parse_uri_list(std::str::from_utf8(bytes).ok()?)?,
    };

    if paths.is_empty() || paths.iter().any(String::is_empty) {
        return None;
    }
    Some(paths)
}

fn looks_like_uri_list(bytes: &[u8]) -> bool {
    bytes.starts_with(b"file:")
}

/// Parse `text/uri-list` and the gnome/mate copied-files variant.
///
/// Every entry must be a `file://` URI or an absolute path.
pub fn parse_uri_list(text: &str) -> Option<Vec<String>> {
    let mut paths = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches(['\r', '\0']);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // x-special/gnome-copied-files leads with the pending operation
        if index == 0 && (line == "copy" || line == "cut") {
            continue;
        }

        if let Some(rest) = line.strip_prefix("file://") {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            if !rest.starts_with('/') {
                return None;
            }
            paths.push(percent_decode(rest));
        } else if line.starts_with('/') {
            paths.push(line.to_string());
        } else {
            return None;
        }
    }

    Some(paths)
}

/// Decode `%XX` escapes bytewise so multi-byte UTF-8 sequences survive
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

/// Parse a Windows `DROPFILES` structure followed by a double-NUL terminated
/// list of NUL-separated paths.
fn parse_hdrop(bytes: &[u8]) -> Option<Vec<String>> {
    const DROPFILES_SIZE: usize = 20;
    if bytes.len() < DROPFILES_SIZE {
        return None;
    }

    let offset = u32::from_le_bytes(bytes[0..4].try_into().ok()?) as usize;
    let wide = u32::from_le_bytes(bytes[16..20].try_into().ok()?) != 0;
    let list = bytes.get(offset..)?;

    let joined = if wide {
        decode_utf16(&list[..list.len() - list.len() % 2])?
    } else {
        std::str::from_utf8(list).ok()?.to_string()
    };

    Some(
        joined
            .split('\0')
            .take_while(|path| !path.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_family_lookup() {
        assert_eq!(FormatFamily::of("text/plain"), FormatFamily::PlainText);
        assert_eq!(
            FormatFamily::of("text/plain; charset=utf-8"),
            FormatFamily::PlainText
        );
        assert_eq!(FormatFamily::of("UTF8_STRING"), FormatFamily::PlainText);
        assert_eq!(FormatFamily::of("UnicodeText"), FormatFamily::PlainText);
        assert_eq!(FormatFamily::of("public.file-url"), FormatFamily::PlainText);
        assert_eq!(FormatFamily::of("HTML Format"), FormatFamily::RichText);
        assert_eq!(FormatFamily::of("text/html"), FormatFamily::RichText);
        assert_eq!(FormatFamily::of("Rtf"), FormatFamily::RichText);
        assert_eq!(FormatFamily::of("text/csv"), FormatFamily::RichText);
        assert_eq!(FormatFamily::of("text/uri-list"), FormatFamily::FileList);
        assert_eq!(FormatFamily::of("FileDrop"), FormatFamily::FileList);
        assert_eq!(FormatFamily::of("image/png"), FormatFamily::Image);
        assert_eq!(FormatFamily::of("image/svg+xml"), FormatFamily::PlainText);
        assert_eq!(FormatFamily::of("DeviceIndependentBitmap"), FormatFamily::Image);
        assert_eq!(FormatFamily::of("application/x-qt-image"), FormatFamily::Other);
        assert_eq!(FormatFamily::of("chromium/x-web-custom-data"), FormatFamily::Other);
    }

    #[test]
    fn test_decode_text_utf8() {
        assert_eq!(decode_text("text/plain", b"hello\0"), Some("hello".to_string()));
        assert_eq!(decode_text("text/plain", "héllo".as_bytes()), Some("héllo".to_string()));
        assert_eq!(decode_text("text/plain", &[0xC3, 0x28]), None);
    }

    #[test]
    fn test_decode_text_utf16() {
        let le: Vec<u8> = "hi€".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(decode_text("UnicodeText", &le), Some("hi€".to_string()));

        let mut be = vec![0xFE, 0xFF];
        be.extend("ok".encode_utf16().flat_map(u16::to_be_bytes));
        assert_eq!(
            decode_text("text/plain;charset=utf-16", &be),
            Some("ok".to_string())
        );

        // Odd length and lone surrogates are not text
        assert_eq!(decode_text("UnicodeText", &[0x41, 0x00, 0x42]), None);
        assert_eq!(decode_text("UnicodeText", &[0x00, 0xD8, 0x41, 0x00]), None);
    }

    #[test]
    fn test_parse_uri_list() {
        let list = "# comment\r\nfile:///home/user/a.txt\r\nfile://localhost/tmp/My%20File.txt\r\n/abs/path\r\n";
        assert_eq!(
            parse_uri_list(list),
            Some(vec![
                "/home/user/a.txt".to_string(),
                "/tmp/My File.txt".to_string(),
                "/abs/path".to_string(),
            ])
        );

        assert_eq!(parse_uri_list("https://example.com/"), None);
    }

    #[test]
    fn test_percent_decode_multibyte() {
        assert_eq!(percent_decode("/tmp/caf%C3%A9"), "/tmp/café");
        assert_eq!(percent_decode("/tmp/100%"), "/tmp/100%");
        assert_eq!(percent_decode("/tmp/%zz"), "/tmp/%zz");
    }

    #[test]
    fn test_decode_gnome_copied_files() {
        let payload = b"copy\nfile:///a\nfile:///b";
        assert_eq!(
            decode_file_list("x-special/gnome-copied-files", payload),
            Some(vec!["/a".to_string(), "/b".to_string()])
        );
    }

    #[test]
    fn test_decode_hdrop_wide() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&20u32.to_le_bytes());
        payload.extend_from_slice(&[0; 12]);
        payload.extend_from_slice(&1u32.to_le_bytes());
        for path in ["C:\\one.txt", "C:\\two.txt"] {
            payload.extend(path.encode_utf16().flat_map(u16::to_le_bytes));
            payload.extend_from_slice(&[0, 0]);
        }
        payload.extend_from_slice(&[0, 0]);

        assert_eq!(
            decode_file_list("FileDrop", &payload),
            Some(vec!["C:\\one.txt".to_string(), "C:\\two.txt".to_string()])
        );
    }

    #[test]
    fn test_decode_hdrop_ansi_is_strict() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&20u32.to_le_bytes());
        payload.extend_from_slice(&[0; 16]);
        payload.extend_from_slice(b"C:\\caf\xE9.txt\0\0");
        assert_eq!(decode_file_list("CF_HDROP", &payload), None);

        let mut valid = payload[..20].to_vec();
        valid.extend_from_slice(b"C:\\a.txt\0C:\\b.txt\0\0");
        assert_eq!(
            decode_file_list("CF_HDROP", &valid),
            Some(vec!["C:\\a.txt".to_string(), "C:\\b.txt".to_string()])
        );
    }

    #[test]
    fn test_decode_file_list_rejects_empty() {
        assert_eq!(decode_file_list("text/uri-list", b""), None);
        assert_eq!(decode_file_list("text/uri-list", b"# only a comment\n"), None);
        assert_eq!(decode_file_list("FileDrop", &[0; 4]), None);
    }

    #[test]
    fn test_dib_formats() {
        assert!(is_dib_format("DeviceIndependentBitmap"));
        assert!(is_dib_format("CF_DIBV5"));
        assert!(!is_dib_format("image/png"));
    }
}
