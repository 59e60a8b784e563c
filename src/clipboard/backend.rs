use crate::error::ClipboardError;
use crate::models::Payload;

/// Trait for clipboard backend abstraction
/// Supports different clipboard systems (Wayland, X11, in-memory)
/// Backend is read-only: the dump never writes to the clipboard
pub trait ClipboardAccessor {
    /// Acquire the clipboard for one dump pass.
    /// The returned session releases it when dropped, on every exit path.
    /// Fails fast with `ClipboardError::Unavailable` if the subsystem cannot be reached.
    fn open(&self) -> Result<Box<dyn ClipboardSession + '_>, ClipboardError>;

    /// Get the backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// An open clipboard, valid until dropped
pub trait ClipboardSession {
    /// Number of clipboard items; zero means the clipboard is empty
    fn item_count(&self) -> Result<usize, ClipboardError>;

    /// Format identifiers offered by one item, in platform order
    fn format_ids(&self, item: usize) -> Result<Vec<String>, ClipboardError>;

    /// Read one format of one item
    fn read(&self, item: usize, format_id: &str) -> Result<Payload, ClipboardError>;
}
