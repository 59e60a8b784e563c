use super::backend::{ClipboardAccessor, ClipboardSession};
use super::process::{parse_lines, run_capture, stderr_message};
use super::Selection;
use crate::error::ClipboardError;
use crate::models::Payload;

const XCLIP: &str = "xclip";
const INSTALL_HINT: &str = "Install xclip package";

/// ICCCM protocol targets that describe the selection rather than hold data
const META_TARGETS: &[&str] = &["TARGETS", "TIMESTAMP", "MULTIPLE", "SAVE_TARGETS", "DELETE"];

/// X11 clipboard backend using xclip
pub struct X11Backend {
    selection: Selection,
}

impl X11Backend {
    pub fn new(selection: Selection) -> Self {
        X11Backend { selection }
    }

    fn selection_args(&self) -> [&'static str; 3] {
        let name = match self.selection {
            Selection::Clipboard => "clipboard",
            Selection::Primary => "primary",
        };
        ["-selection", name, "-o"]
    }
}

impl ClipboardAccessor for X11Backend {
    fn open(&self) -> Result<Box<dyn ClipboardSession + '_>, ClipboardError> {
        let version = run_capture(XCLIP, &["-version"], INSTALL_HINT)?;
        if !version.status.success() {
            return Err(ClipboardError::Unavailable(stderr_message(&version)));
        }

        let mut args = self.selection_args().to_vec();
        args.extend(["-t", "TARGETS"]);
        let output = run_capture(XCLIP, &args, INSTALL_HINT)?;

        let format_ids = if output.status.success() {
            parse_targets(&output.stdout)
        } else {
            let message = stderr_message(&output);
            if !is_empty_selection(&message) {
                return Err(ClipboardError::Unavailable(message));
            }
            log::debug!("xclip reports empty selection: {}", message);
            Vec::new()
        };

        log::debug!(
            "Opened X11 {} selection with {} targets",
            self.selection,
            format_ids.len()
        );
        Ok(Box::new(X11Session {
            backend: self,
            format_ids,
        }))
    }

    fn name(&self) -> &'static str {
        "X11"
    }
}

/// Data-bearing targets from a TARGETS listing
fn parse_targets(stdout: &[u8]) -> Vec<String> {
    parse_lines(stdout)
        .into_iter()
        .filter(|target| !META_TARGETS.contains(&target.as_str()))
        .collect()
}

fn is_empty_selection(stderr: &str) -> bool {
    stderr.contains("target TARGETS not available") || stderr.contains("no owner")
}

struct X11Session<'a> {
    backend: &'a X11Backend,
    format_ids: Vec<String>,
}

impl ClipboardSession for X11Session<'_> {
    fn item_count(&self) -> Result<usize, ClipboardError> {
        Ok(usize::from(!self.format_ids.is_empty()))
    }

    fn format_ids(&self, _item: usize) -> Result<Vec<String>, ClipboardError> {
        Ok(self.format_ids.clone())
    }

    fn read(&self, _item: usize, format_id: &str) -> Result<Payload, ClipboardError> {
        let mut args: Vec<&str> = self.backend.selection_args().to_vec();
        args.extend(["-t", format_id]);

        let output = run_capture(XCLIP, &args, INSTALL_HINT)
            .map_err(|e| ClipboardError::format_read(format_id, e.to_string()))?;

        if !output.status.success() {
            return Err(ClipboardError::format_read(format_id, stderr_message(&output)));
        }

        log::debug!("Read {} bytes for {}", output.stdout.len(), format_id);
        Ok(Payload::Bytes(output.stdout))
    }
}

impl Drop for X11Session<'_> {
    fn drop(&mut self) {
        log::debug!("Closed X11 {} selection", self.backend.selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets_drops_meta_targets() {
        let stdout = b"TIMESTAMP\nTARGETS\nMULTIPLE\nSAVE_TARGETS\nUTF8_STRING\ntext/html\nimage/png\n";
        assert_eq!(
            parse_targets(stdout),
            vec!["UTF8_STRING", "text/html", "image/png"]
        );
    }

    #[test]
    fn test_empty_selection_messages() {
        assert!(is_empty_selection("Error: target TARGETS not available"));
        assert!(!is_empty_selection("Error: Can't open display: :0"));
    }

    #[test]
    fn test_selection_args() {
        assert_eq!(
            X11Backend::new(Selection::Primary).selection_args(),
            ["-selection", "primary", "-o"]
        );
    }
}
