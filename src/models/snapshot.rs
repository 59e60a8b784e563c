use image::DynamicImage;
use std::cell::OnceCell;

use crate::clipboard::{ClipboardError, ClipboardSession};
use crate::formats::{self, FormatFamily};

/// Raw payload handed over by a clipboard accessor.
/// All type discrimination happens here, at the boundary.
#[derive(Debug, Clone)]
pub enum Payload {
    /// String-valued payload
    Text(String),
    /// Raw bytes as published by the owning application
    Bytes(Vec<u8>),
    /// Platform-decoded list of file paths
    PathList(Vec<String>),
    /// Native in-memory bitmap
    Image(DynamicImage),
    /// Present in the format list but not retrievable
    Unsupported,
}

/// Clipboard state at one instant: ordered items, each with sorted format ids
#[derive(Debug, Clone, Default)]
pub struct ClipboardSnapshot {
    items: Vec<ClipboardItem>,
}

impl ClipboardSnapshot {
    /// Capture the format lists of every item.
    /// Only fails when the clipboard cannot be enumerated at all.
    pub fn capture(session: &dyn ClipboardSession) -> Result<Self, ClipboardError> {
        let count = session.item_count()?;
        let mut items = Vec::with_capacity(count);

        for index in 0..count {
            let mut format_ids = session.format_ids(index)?;
            format_ids.sort();
            format_ids.dedup();
            log::debug!("Item {}: {} formats", index, format_ids.len());
            items.push(ClipboardItem { index, format_ids });
        }

        Ok(ClipboardSnapshot { items })
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of (item, format) pairs
    pub fn format_count(&self) -> usize {
        self.items.iter().map(|item| item.format_ids.len()).sum()
    }
}

/// One clipboard entry; a single one on most platforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    index: usize,
    format_ids: Vec<String>,
}

impl ClipboardItem {
    /// Zero-based position in the snapshot
    pub fn index(&self) -> usize {
        self.index
    }

    /// Format identifiers, sorted lexicographically without duplicates
    pub fn format_ids(&self) -> &[String] {
        &self.format_ids
    }

    /// Lazy accessor for one of this item's formats
    pub fn access<'s>(&self, session: &'s dyn ClipboardSession, format_id: &str) -> FormatEntry<'s> {
        FormatEntry::new(session, self.index, format_id)
    }

    /// Lazy accessors for every format, in sorted order
    pub fn entries<'a, 's>(
        &'a self,
        session: &'s dyn ClipboardSession,
    ) -> impl Iterator<Item = FormatEntry<'s>> + 'a
    where
        's: 'a,
    {
        self.format_ids
            .iter()
            .map(move |format_id| self.access(session, format_id))
    }
}

/// A single format of a single item.
///
/// The platform read happens on first access and at most once; the result
/// lives only as long as the entry, i.e. one render pass.
pub struct FormatEntry<'s> {
    session: &'s dyn ClipboardSession,
    item: usize,
    format_id: String,
    family: FormatFamily,
    payload: OnceCell<Result<Payload, ClipboardError>>,
    text: OnceCell<Option<String>>,
    paths: OnceCell<Option<Vec<String>>>,
}

impl<'s> FormatEntry<'s> {
    fn new(session: &'s dyn ClipboardSession, item: usize, format_id: &str) -> Self {
        FormatEntry {
            session,
            item,
            format_id: format_id.to_string(),
            family: FormatFamily::of(format_id),
            payload: OnceCell::new(),
            text: OnceCell::new(),
            paths: OnceCell::new(),
        }
    }

    pub fn format_id(&self) -> &str {
        &self.format_id
    }

    pub fn family(&self) -> FormatFamily {
        self.family
    }

    fn read(&self) -> &Result<Payload, ClipboardError> {
        self.payload.get_or_init(|| {
            let result = self.session.read(self.item, &self.format_id);
            if let Err(e) = &result {
                log::warn!("{}", e);
            }
            result
        })
    }

    /// Payload if the read succeeded
    pub fn payload(&self) -> Option<&Payload> {
        self.read().as_ref().ok()
    }

    /// Error from the platform read, if it failed
    pub fn read_error(&self) -> Option<&ClipboardError> {
        self.read().as_ref().err()
    }

    /// Text view of the payload: string payloads as-is, byte payloads through
    /// a strict decode attempt
    pub fn fetch_text(&self) -> Option<&str> {
        match self.payload()? {
            Payload::Text(text) => Some(text),
            Payload::Bytes(bytes) => self
                .text
                .get_or_init(|| formats::decode_text(&self.format_id, bytes))
                .as_deref(),
            _ => None,
        }
    }

    /// Raw bytes, when the platform provides them
    pub fn fetch_bytes(&self) -> Option<&[u8]> {
        match self.payload()? {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Path list: native path payloads for any format, decoded text or bytes
    /// for file-list formats
    pub fn fetch_paths(&self) -> Option<&[String]> {
        self.paths
            .get_or_init(|| match self.payload()? {
                Payload::PathList(paths) if !paths.is_empty() => Some(paths.clone()),
                Payload::Bytes(bytes) if self.family == FormatFamily::FileList => {
                    formats::decode_file_list(&self.format_id, bytes)
                }
                Payload::Text(text) if self.family == FormatFamily::FileList => {
                    formats::parse_uri_list(text).filter(|paths| !paths.is_empty())
                }
                _ => None,
            })
            .as_deref()
    }

    /// Native bitmap, when the platform hands one over
    pub fn fetch_image(&self) -> Option<&DynamicImage> {
        match self.payload()? {
            Payload::Image(image) => Some(image),
            _ => None,
        }
    }
}
