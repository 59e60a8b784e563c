use std::io::Write;

use crate::classify::{classify, Availability};
use crate::clipboard::{ClipboardAccessor, Selection};
use crate::error::DumpResult;
use crate::models::{Classification, ClipboardSnapshot};
use crate::render::{self, RenderOptions};

/// Exact output for a clipboard with no items
pub const EMPTY_MESSAGE: &str = "Clipboard: empty";

/// Options for one dump pass
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpOptions {
    pub render: RenderOptions,
    /// Shown in the header only
    pub selection: Selection,
}

/// Counts collected while dumping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub items: usize,
    pub formats: usize,
    /// Blocks per kind, indexed like `Classification::KINDS`
    pub kinds: [usize; 6],
}

impl DumpSummary {
    fn record(&mut self, classification: Classification) {
        let name = classification.kind_name();
        if let Some(slot) = Classification::KINDS.iter().position(|kind| *kind == name) {
            self.kinds[slot] += 1;
        }
        self.formats += 1;
    }

    /// Number of blocks rendered with the given kind name
    pub fn count(&self, kind: &str) -> usize {
        Classification::KINDS
            .iter()
            .position(|k| *k == kind)
            .map(|slot| self.kinds[slot])
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

/// Dump every format of every clipboard item to `out`.
///
/// Enumerate, classify, render: once per (item, format) pair in sorted order.
/// Per-format failures are rendered in place; only an unreachable clipboard or
/// a broken sink aborts the pass.
pub fn dump<W: Write + ?Sized>(
    accessor: &dyn ClipboardAccessor,
    out: &mut W,
    options: &DumpOptions,
) -> DumpResult<DumpSummary> {
    let session = accessor.open()?;
    let snapshot = ClipboardSnapshot::capture(&*session)?;
    let mut summary = DumpSummary::default();

    if snapshot.is_empty() {
        log::info!("Clipboard is empty");
        writeln!(out, "{}", EMPTY_MESSAGE)?;
        return Ok(summary);
    }

    render::write_section(out, "Clipboard")?;
    render::write_field(out, "Backend", accessor.name())?;
    render::write_field(out, "Selection", options.selection)?;
    render::write_field(
        out,
        "Captured",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    )?;
    render::write_field(out, "Items", snapshot.len())?;
    writeln!(out)?;

    let total = snapshot.len();
    for item in snapshot.items() {
        render::write_section(out, &format!("Item {} of {}", item.index() + 1, total))?;
        render::write_field(out, "Formats", item.format_ids().len())?;
        writeln!(out)?;

        for entry in item.entries(&*session) {
            let classification = classify(entry.format_id(), &Availability::probe(&entry));
            log::debug!("{} -> {}", entry.format_id(), classification);
            render::render_block(out, &entry, classification, &options.render)?;
            summary.record(classification);
        }
        summary.items += 1;
    }

    render::write_section(out, "Summary")?;
    render::write_field(out, "Formats", summary.formats)?;
    for (kind, count) in Classification::KINDS.iter().zip(summary.kinds) {
        render::write_field(out, kind, count)?;
    }

    log::info!(
        "Dumped {} formats across {} items",
        summary.formats,
        summary.items
    );
    Ok(summary)
}

/// Print only the format identifiers of each item, reading no payloads
pub fn list_formats<W: Write + ?Sized>(
    accessor: &dyn ClipboardAccessor,
    out: &mut W,
) -> DumpResult<usize> {
    let session = accessor.open()?;
    let snapshot = ClipboardSnapshot::capture(&*session)?;

    if snapshot.is_empty() {
        writeln!(out, "{}", EMPTY_MESSAGE)?;
        return Ok(0);
    }

    let total = snapshot.len();
    for item in snapshot.items() {
        render::write_section(out, &format!("Item {} of {}", item.index() + 1, total))?;
        for format_id in item.format_ids() {
            writeln!(out, "{}", format_id)?;
        }
    }

    Ok(snapshot.format_count())
}
