use thiserror::Error;

/// Errors raised at the clipboard boundary
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Platform clipboard subsystem cannot be reached (fatal)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// A single format's accessor failed; recovered as an unreadable block
    #[error("failed to read format {format}: {reason}")]
    FormatRead { format: String, reason: String },

    /// Image re-encoding failed; recovered as an explicit marker
    #[error("image encode error: {0}")]
    Encode(String),
}

impl ClipboardError {
    pub fn format_read(format: &str, reason: impl Into<String>) -> Self {
        ClipboardError::FormatRead {
            format: format.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a whole dump pass
#[derive(Error, Debug)]
pub enum DumpError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// The output sink went away
    #[error("failed to write dump output: {0}")]
    Io(#[from] std::io::Error),
}

pub type DumpResult<T> = std::result::Result<T, DumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClipboardError::format_read("text/html", "wl-paste exited with 1");
        assert_eq!(
            err.to_string(),
            "failed to read format text/html: wl-paste exited with 1"
        );

        let err: DumpError = ClipboardError::Unavailable("no display".to_string()).into();
        assert_eq!(err.to_string(), "clipboard unavailable: no display");
    }
}
