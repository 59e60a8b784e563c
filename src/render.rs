//! Text rendering of dump sections and per-format blocks.
//!
//! Section layout:
//!
//! ```text
//! === Item 1 of 1 ===
//! Formats      : 2
//!
//! --- text/plain ---
//! Kind         : Text
//! Chars        : 5
//! UTF8 bytes   : 5
//! Content      :
//! hello
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::image;
use crate::models::{Classification, FormatEntry};

/// Default number of payload bytes shown in a hex preview
pub const PREVIEW_BYTES: usize = 128;

const LABEL_WIDTH: usize = 13;

/// Parameters shared by every block of a dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Upper bound on hex-previewed bytes
    pub max_preview_bytes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            max_preview_bytes: PREVIEW_BYTES,
        }
    }
}

impl RenderOptions {
    fn hex_label(&self) -> String {
        format!("Hex({})", self.max_preview_bytes)
    }
}

/// Uppercase hex of the first `limit` bytes, single-space separated
pub fn hex_preview(bytes: &[u8], limit: usize) -> String {
    let shown = &bytes[..bytes.len().min(limit)];
    let mut out = String::with_capacity(shown.len() * 3);
    for (i, byte) in shown.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

/// Write a `=== Title ===` section header
pub fn write_section<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "=== {} ===", title)
}

/// Write a labeled `Label : value` field
pub fn write_field<W: Write + ?Sized>(
    out: &mut W,
    label: &str,
    value: impl std::fmt::Display,
) -> io::Result<()> {
    writeln!(out, "{:<width$}: {}", label, value, width = LABEL_WIDTH)
}

/// Write a bare label introducing multi-line content
fn write_label<W: Write + ?Sized>(out: &mut W, label: &str) -> io::Result<()> {
    writeln!(out, "{:<width$}:", label, width = LABEL_WIDTH)
}

/// Title line of a per-format block
pub fn block_title(format_id: &str, classification: Classification) -> String {
    if classification.is_fallback() {
        format!("--- {} (text fallback) ---", format_id)
    } else {
        format!("--- {} ---", format_id)
    }
}

/// Render one classified format entry.
/// Per-format failures become diagnostic lines; only sink errors propagate.
pub fn render_block<W: Write + ?Sized>(
    out: &mut W,
    entry: &FormatEntry<'_>,
    classification: Classification,
    options: &RenderOptions,
) -> io::Result<()> {
    writeln!(out, "{}", block_title(entry.format_id(), classification))?;
    write_field(out, "Kind", classification)?;

    match classification {
        Classification::Text { .. } | Classification::RichText => match entry.fetch_text() {
            Some(text) => render_text(out, text)?,
            None => render_unreadable(out, entry)?,
        },
        Classification::FileList => match entry.fetch_paths() {
            Some(paths) => render_file_list(out, paths)?,
            None => render_unreadable(out, entry)?,
        },
        Classification::Image => render_image(out, entry, options)?,
        Classification::Binary => match entry.fetch_bytes() {
            Some(bytes) => render_binary(out, bytes, options)?,
            None => render_unreadable(out, entry)?,
        },
        Classification::Unreadable => render_unreadable(out, entry)?,
    }

    writeln!(out)
}

/// Character count is in Unicode scalar values
pub fn render_text<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    write_field(out, "Chars", text.chars().count())?;
    write_field(out, "UTF8 bytes", text.len())?;
    write_label(out, "Content")?;
    writeln!(out, "{}", text)
}

pub fn render_file_list<W: Write + ?Sized>(out: &mut W, paths: &[String]) -> io::Result<()> {
    write_field(out, "Count", paths.len())?;
    write_label(out, "Content")?;
    writeln!(out, "{}", paths.join("\n"))
}

pub fn render_binary<W: Write + ?Sized>(
    out: &mut W,
    bytes: &[u8],
    options: &RenderOptions,
) -> io::Result<()> {
    write_field(out, "Bytes", bytes.len())?;
    write_field(
        out,
        &options.hex_label(),
        hex_preview(bytes, options.max_preview_bytes),
    )
}

fn render_image<W: Write + ?Sized>(
    out: &mut W,
    entry: &FormatEntry<'_>,
    options: &RenderOptions,
) -> io::Result<()> {
    match image::reencode_entry(entry) {
        Ok(encoded) => {
            write_field(out, "Encoding", encoded.encoding())?;
            write_field(out, "Bytes", encoded.data.len())?;
            match encoded.dimensions {
                Some((width, height)) => write_field(out, "Dimensions", format!("{}x{}", width, height))?,
                None => write_field(out, "Dimensions", "unknown")?,
            }
            write_field(
                out,
                &options.hex_label(),
                hex_preview(&encoded.data, options.max_preview_bytes),
            )
        }
        Err(e) => {
            log::warn!("{}: {}", entry.format_id(), e);
            if let Some(bytes) = entry.fetch_bytes() {
                write_field(out, "Raw bytes", bytes.len())?;
            }
            write_field(out, "Error", format!("unable to encode image ({})", e))
        }
    }
}

fn render_unreadable<W: Write + ?Sized>(out: &mut W, entry: &FormatEntry<'_>) -> io::Result<()> {
    match entry.read_error() {
        Some(e) => write_field(out, "Error", format!("unable to read clipboard data ({})", e)),
        None => write_field(out, "Error", "unable to read clipboard data"),
    }
}
