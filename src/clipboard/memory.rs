use std::cell::Cell;

use super::backend::{ClipboardAccessor, ClipboardSession};
use crate::error::ClipboardError;
use crate::models::Payload;

/// One format slot: a payload, or the reason its accessor fails
type Slot = (String, Result<Payload, String>);

/// In-process clipboard with any number of items.
/// Used to replay clipboard states without a display server.
#[derive(Default)]
pub struct MemoryClipboard {
    items: Vec<Vec<Slot>>,
    unavailable: Option<String>,
    reads: Cell<usize>,
}

impl MemoryClipboard {
    /// Create an empty in-memory clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose subsystem can never be opened
    pub fn unavailable(reason: &str) -> Self {
        MemoryClipboard {
            unavailable: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Append an item offering the given formats, in platform order
    pub fn with_item<S: Into<String>>(mut self, formats: Vec<(S, Payload)>) -> Self {
        self.items.push(
            formats
                .into_iter()
                .map(|(id, payload)| (id.into(), Ok(payload)))
                .collect(),
        );
        self
    }

    /// Add a format to `item` whose accessor always fails.
    /// Missing items up to `item` are created empty.
    pub fn with_failing_format(mut self, item: usize, format_id: &str) -> Self {
        while self.items.len() <= item {
            self.items.push(Vec::new());
        }
        self.items[item].push((
            format_id.to_string(),
            Err("accessor raised on text and bytes access".to_string()),
        ));
        self
    }

    /// Number of payload reads served so far
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl ClipboardAccessor for MemoryClipboard {
    fn open(&self) -> Result<Box<dyn ClipboardSession + '_>, ClipboardError> {
        if let Some(reason) = &self.unavailable {
            return Err(ClipboardError::Unavailable(reason.clone()));
        }
        Ok(Box::new(MemorySession { clipboard: self }))
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}

struct MemorySession<'a> {
    clipboard: &'a MemoryClipboard,
}

impl MemorySession<'_> {
    fn item(&self, item: usize) -> Result<&[Slot], ClipboardError> {
        self.clipboard
            .items
            .get(item)
            .map(Vec::as_slice)
            .ok_or_else(|| ClipboardError::Unavailable(format!("no clipboard item {}", item)))
    }
}

impl ClipboardSession for MemorySession<'_> {
    fn item_count(&self) -> Result<usize, ClipboardError> {
        Ok(self.clipboard.items.len())
    }

    fn format_ids(&self, item: usize) -> Result<Vec<String>, ClipboardError> {
        Ok(self.item(item)?.iter().map(|(id, _)| id.clone()).collect())
    }

    fn read(&self, item: usize, format_id: &str) -> Result<Payload, ClipboardError> {
        self.clipboard.reads.set(self.clipboard.reads.get() + 1);

        let (_, slot) = self
            .item(item)?
            .iter()
            .find(|(id, _)| id == format_id)
            .ok_or_else(|| ClipboardError::format_read(format_id, "format no longer offered"))?;

        slot.clone()
            .map_err(|reason| ClipboardError::format_read(format_id, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_fails_open() {
        let clipboard = MemoryClipboard::unavailable("clipboard locked by another process");
        assert!(matches!(
            clipboard.open(),
            Err(ClipboardError::Unavailable(reason)) if reason.contains("locked")
        ));
    }

    #[test]
    fn test_read_unknown_format() {
        let clipboard = MemoryClipboard::new().with_item(vec![("text/plain", Payload::Unsupported)]);
        let session = clipboard.open().unwrap();

        assert_eq!(session.item_count().unwrap(), 1);
        assert!(matches!(
            session.read(0, "text/html"),
            Err(ClipboardError::FormatRead { .. })
        ));
        assert!(matches!(session.read(0, "text/plain"), Ok(Payload::Unsupported)));
        assert_eq!(clipboard.read_count(), 2);
    }
}
