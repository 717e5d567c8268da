//! File logging for the binary. The terminal belongs to the game, so log
//! lines never go to stdout; a log file that cannot be opened only costs the
//! log, never the game.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log output ended up after [`init`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Disabled,
}

/// Install a global subscriber writing to `path`, filtered by `RUST_LOG`
/// (default `info`). Falls back to [`LogSink::Disabled`] when the file cannot
/// be created or a subscriber is already installed.
pub fn init(path: &Path) -> LogSink {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            // Printed before raw mode, so it survives on the normal screen.
            eprintln!("logging disabled: cannot create {}: {err}", path.display());
            return LogSink::Disabled;
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    match installed {
        Ok(()) => LogSink::File(path.to_path_buf()),
        Err(_) => LogSink::Disabled,
    }
}
