use std::io::ErrorKind;
use std::process::{Command, Output, Stdio};

use crate::error::ClipboardError;

/// Run a clipboard helper tool and capture its output.
/// A missing binary means the clipboard subsystem is unreachable.
pub fn run_capture(program: &str, args: &[&str], install_hint: &str) -> Result<Output, ClipboardError> {
    log::debug!("Running {} {}", program, args.join(" "));

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ClipboardError::Unavailable(format!("{} not found. {}", program, install_hint))
            }
            _ => ClipboardError::Unavailable(format!("Failed to run {}: {}", program, e)),
        })
}

/// Trimmed stderr of a finished helper, for error messages
pub fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr
    }
}

/// Split newline-separated helper output into format identifiers
pub fn parse_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let stdout = b"text/plain\n\nTEXT\r\n  image/png  \n";
        assert_eq!(parse_lines(stdout), vec!["text/plain", "TEXT", "image/png"]);
        assert!(parse_lines(b"").is_empty());
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let err = run_capture("clipdump-no-such-helper", &["--version"], "Install it").unwrap_err();
        match err {
            ClipboardError::Unavailable(message) => {
                assert!(message.contains("clipdump-no-such-helper not found"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
