//! Format classification.
//!
//! `classify` is a pure function of the format identifier and what the
//! accessor could produce for it. The rules are tried in order and the first
//! match wins, so a known text format that also exposes raw bytes is always
//! text, never binary.

use crate::formats::FormatFamily;
use crate::models::{Classification, FormatEntry, Payload};

/// What could be obtained for one format entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    /// A decodable string
    pub text: bool,
    /// Raw bytes
    pub bytes: bool,
    /// A non-empty list of paths
    pub paths: bool,
    /// A native bitmap
    pub image: bool,
}

impl Availability {
    /// Probe an entry, triggering its (single) platform read
    pub fn probe(entry: &FormatEntry<'_>) -> Self {
        let availability = Availability {
            text: entry.fetch_text().is_some(),
            bytes: entry.fetch_bytes().is_some(),
            paths: entry.fetch_paths().is_some(),
            image: matches!(entry.payload(), Some(Payload::Image(_))),
        };
        log::trace!("{}: {:?}", entry.format_id(), availability);
        availability
    }
}

/// Map a format to exactly one classification
pub fn classify(format_id: &str, available: &Availability) -> Classification {
    let family = FormatFamily::of(format_id);

    if family.is_textual() && available.text {
        return match family {
            FormatFamily::RichText => Classification::RichText,
            _ => Classification::Text { fallback: false },
        };
    }

    // A native path list or bitmap counts whatever the identifier says
    if available.paths {
        return Classification::FileList;
    }

    if available.image || (family == FormatFamily::Image && available.bytes) {
        return Classification::Image;
    }

    if available.bytes {
        return Classification::Binary;
    }

    if available.text {
        return Classification::Text { fallback: true };
    }

    Classification::Unreadable
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: Availability = Availability {
        text: true,
        bytes: true,
        paths: true,
        image: true,
    };
    const BYTES: Availability = Availability {
        text: false,
        bytes: true,
        paths: false,
        image: false,
    };
    const TEXT: Availability = Availability {
        text: true,
        bytes: false,
        paths: false,
        image: false,
    };
    const NOTHING: Availability = Availability {
        text: false,
        bytes: false,
        paths: false,
        image: false,
    };

    #[test]
    fn test_known_text_beats_binary() {
        for id in ["text/plain", "UTF8_STRING", "UnicodeText", "Text", "OemText", "public.url", "image/svg+xml"] {
            assert_eq!(classify(id, &ALL), Classification::Text { fallback: false }, "{}", id);
        }
        for id in ["text/html", "HTML Format", "Html", "Rtf", "text/csv", "text/markdown"] {
            assert_eq!(classify(id, &ALL), Classification::RichText, "{}", id);
        }
    }

    #[test]
    fn test_undecodable_known_text_is_binary() {
        assert_eq!(classify("text/plain", &BYTES), Classification::Binary);
        assert_eq!(classify("text/html", &BYTES), Classification::Binary);
    }

    #[test]
    fn test_file_list() {
        let available = Availability {
            text: true,
            bytes: true,
            paths: true,
            image: false,
        };
        assert_eq!(classify("text/uri-list", &available), Classification::FileList);
        assert_eq!(classify("FileDrop", &available), Classification::FileList);

        // A uri-list that does not decode to paths falls through
        let no_paths = Availability { paths: false, ..available };
        assert_eq!(classify("text/uri-list", &no_paths), Classification::Binary);
    }

    #[test]
    fn test_image() {
        assert_eq!(classify("image/png", &BYTES), Classification::Image);
        assert_eq!(classify("DeviceIndependentBitmap", &BYTES), Classification::Image);
        let native = Availability { image: true, ..NOTHING };
        assert_eq!(classify("Bitmap", &native), Classification::Image);
        assert_eq!(classify("image/png", &NOTHING), Classification::Unreadable);
    }

    #[test]
    fn test_native_payloads_outside_tables() {
        let native_image = Availability { image: true, ..NOTHING };
        assert_eq!(classify("application/x-qt-image", &native_image), Classification::Image);

        let native_paths = Availability { paths: true, ..NOTHING };
        assert_eq!(classify("public.file-url", &native_paths), Classification::FileList);

        // Raw bytes under an unknown id stay binary
        assert_eq!(classify("application/x-qt-image", &BYTES), Classification::Binary);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(classify("application/x-custom", &BYTES), Classification::Binary);
        assert_eq!(
            classify("application/x-custom", &TEXT),
            Classification::Text { fallback: true }
        );
        assert_eq!(classify("application/x-custom", &NOTHING), Classification::Unreadable);
        assert_eq!(classify("text/plain", &NOTHING), Classification::Unreadable);
    }

    #[test]
    fn test_classification_is_total() {
        let ids = [
            "text/plain",
            "text/html",
            "text/uri-list",
            "image/png",
            "application/octet-stream",
            "",
        ];
        for id in ids {
            for bits in 0..16u8 {
                let available = Availability {
                    text: bits & 1 != 0,
                    bytes: bits & 2 != 0,
                    paths: bits & 4 != 0,
                    image: bits & 8 != 0,
                };
                let kind = classify(id, &available);
                assert!(Classification::KINDS.contains(&kind.kind_name()));
            }
        }
    }
}
