pub mod backend;
pub mod memory;
pub mod process;
pub mod wayland;
pub mod x11;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

pub use crate::error::ClipboardError;
pub use backend::{ClipboardAccessor, ClipboardSession};
pub use memory::MemoryClipboard;
pub use wayland::WaylandBackend;
pub use x11::X11Backend;

/// Which clipboard backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Detect from the environment
    #[default]
    Auto,
    /// wl-clipboard (wl-paste)
    Wayland,
    /// xclip
    X11,
}

/// Which selection to inspect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// The regular copy/paste clipboard
    #[default]
    Clipboard,
    /// The primary (middle-click) selection
    Primary,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Clipboard => f.write_str("clipboard"),
            Selection::Primary => f.write_str("primary"),
        }
    }
}

/// Create a clipboard backend based on the requested kind.
/// `Auto` detects Wayland via WAYLAND_DISPLAY, then X11 via DISPLAY.
/// Returns `ClipboardError::Unavailable` if no display server is detected.
pub fn create_backend(
    kind: BackendKind,
    selection: Selection,
) -> Result<Box<dyn ClipboardAccessor>, ClipboardError> {
    match kind {
        BackendKind::Wayland => {
            log::info!("Using Wayland clipboard backend");
            Ok(Box::new(WaylandBackend::new(selection)))
        }
        BackendKind::X11 => {
            log::info!("Using X11 clipboard backend");
            Ok(Box::new(X11Backend::new(selection)))
        }
        BackendKind::Auto => {
            let detected = detect_backend(
                env::var_os("WAYLAND_DISPLAY").is_some(),
                env::var_os("DISPLAY").is_some(),
            )?;
            create_backend(detected, selection)
        }
    }
}

/// Never returns `BackendKind::Auto`
fn detect_backend(wayland: bool, x11: bool) -> Result<BackendKind, ClipboardError> {
    if wayland {
        log::debug!("Detected Wayland display server");
        Ok(BackendKind::Wayland)
    } else if x11 {
        log::debug!("Detected X11 display server");
        Ok(BackendKind::X11)
    } else {
        Err(ClipboardError::Unavailable(
            "No supported display server detected. Set WAYLAND_DISPLAY or DISPLAY".to_string(),
        ))
    }
}
