use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use clipdump::clipboard::{self, BackendKind, Selection};
use clipdump::config::{default_config_path, TomlConfigStorage};
use clipdump::dump::{self, DumpOptions};
use clipdump::logging;
use clipdump::render::RenderOptions;

#[derive(Parser)]
#[command(name = "clipdump")]
#[command(about = "Dump every format currently on the clipboard", long_about = None)]
struct Cli {
    /// Clipboard backend (default: detect from the environment)
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Inspect the primary selection instead of the clipboard
    #[arg(long)]
    primary: bool,

    /// Bytes shown in hex previews (default: 128)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_preview_bytes: Option<u64>,

    /// Config file (default: $XDG_CONFIG_HOME/clipdump/clipdump.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Only list format identifiers, without reading payloads
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = TomlConfigStorage::new(config_path).load()?.general;

    let log_file = cli.log_file.or(config.log_file);
    logging::init_logger(log_file.as_deref(), &config.log_level)?;

    let selection = if cli.primary {
        Selection::Primary
    } else {
        config.selection
    };
    let backend_kind = cli.backend.unwrap_or(config.backend);
    let max_preview_bytes = match cli.max_preview_bytes {
        Some(bytes) => usize::try_from(bytes).context("--max-preview-bytes is too large")?,
        None => config.max_preview_bytes,
    };

    let backend = clipboard::create_backend(backend_kind, selection)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        dump::list_formats(backend.as_ref(), &mut out)?;
    } else {
        let options = DumpOptions {
            render: RenderOptions { max_preview_bytes },
            selection,
        };
        dump::dump(backend.as_ref(), &mut out, &options)?;
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}
