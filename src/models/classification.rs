use std::fmt;

/// How a single format entry is interpreted and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Decodable text; `fallback` is set when the format is not a known text format
    Text { fallback: bool },
    /// HTML, RTF, CSV or Markdown text
    RichText,
    /// Ordered list of file paths
    FileList,
    /// Bitmap or encoded image, re-encoded before preview
    Image,
    /// Opaque bytes, hex previewed
    Binary,
    /// Neither text nor bytes could be read
    Unreadable,
}

impl Classification {
    /// All kinds, in summary order
    pub const KINDS: [&'static str; 6] = ["Text", "RichText", "FileList", "Image", "Binary", "Unreadable"];

    /// Kind name shown in the `Kind` field
    pub fn kind_name(&self) -> &'static str {
        match self {
            Classification::Text { .. } => "Text",
            Classification::RichText => "RichText",
            Classification::FileList => "FileList",
            Classification::Image => "Image",
            Classification::Binary => "Binary",
            Classification::Unreadable => "Unreadable",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Classification::Text { fallback: true })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}
