pub mod classification;
pub mod snapshot;

pub use classification::Classification;
pub use snapshot::{ClipboardItem, ClipboardSnapshot, FormatEntry, Payload};
