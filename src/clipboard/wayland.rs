use super::backend::{ClipboardAccessor, ClipboardSession};
use super::process::{parse_lines, run_capture, stderr_message};
use super::Selection;
use crate::error::ClipboardError;
use crate::models::Payload;

const WL_PASTE: &str = "wl-paste";
const INSTALL_HINT: &str = "Install wl-clipboard package";

/// Wayland clipboard backend using wl-clipboard tools
/// Requires wl-paste to be installed
pub struct WaylandBackend {
    selection: Selection,
}

impl WaylandBackend {
    /// Create a new Wayland clipboard backend
    pub fn new(selection: Selection) -> Self {
        WaylandBackend { selection }
    }

    fn base_args(&self) -> Vec<&'static str> {
        match self.selection {
            Selection::Clipboard => vec![],
            Selection::Primary => vec!["--primary"],
        }
    }
}

impl ClipboardAccessor for WaylandBackend {
    fn open(&self) -> Result<Box<dyn ClipboardSession + '_>, ClipboardError> {
        // Verify wl-paste is available
        let version = run_capture(WL_PASTE, &["--version"], INSTALL_HINT)?;
        if !version.status.success() {
            return Err(ClipboardError::Unavailable(stderr_message(&version)));
        }

        let mut args = self.base_args();
        args.push("--list-types");
        let output = run_capture(WL_PASTE, &args, INSTALL_HINT)?;

        let format_ids = if output.status.success() {
            parse_lines(&output.stdout)
        } else {
            let message = stderr_message(&output);
            if !is_empty_selection(&message) {
                return Err(ClipboardError::Unavailable(message));
            }
            log::debug!("wl-paste reports empty selection: {}", message);
            Vec::new()
        };

        log::debug!(
            "Opened Wayland {} selection with {} formats",
            self.selection,
            format_ids.len()
        );
        Ok(Box::new(WaylandSession {
            backend: self,
            format_ids,
        }))
    }

    fn name(&self) -> &'static str {
        "Wayland"
    }
}

/// wl-paste exits non-zero when nothing is offered
fn is_empty_selection(stderr: &str) -> bool {
    stderr.contains("Nothing is copied") || stderr.contains("No selection")
}

struct WaylandSession<'a> {
    backend: &'a WaylandBackend,
    format_ids: Vec<String>,
}

impl ClipboardSession for WaylandSession<'_> {
    fn item_count(&self) -> Result<usize, ClipboardError> {
        // Wayland offers a single data source per selection
        Ok(usize::from(!self.format_ids.is_empty()))
    }

    fn format_ids(&self, _item: usize) -> Result<Vec<String>, ClipboardError> {
        Ok(self.format_ids.clone())
    }

    fn read(&self, _item: usize, format_id: &str) -> Result<Payload, ClipboardError> {
        let mut args: Vec<&str> = self.backend.base_args();
        args.extend(["--no-newline", "--type", format_id]);

        let output = run_capture(WL_PASTE, &args, INSTALL_HINT)
            .map_err(|e| ClipboardError::format_read(format_id, e.to_string()))?;

        if !output.status.success() {
            return Err(ClipboardError::format_read(format_id, stderr_message(&output)));
        }

        log::debug!("Read {} bytes for {}", output.stdout.len(), format_id);
        Ok(Payload::Bytes(output.stdout))
    }
}

impl Drop for WaylandSession<'_> {
    fn drop(&mut self) {
        log::debug!("Closed Wayland {} selection", self.backend.selection);
    }
}
