//! Logging sink for CGUI
//!
//! All components log through the `log` facade. The env_logger backend is
//! installed once from `main`; every record goes to stderr and, best-effort,
//! to a log file. A failing file write never reaches the caller.

use crate::utils::config::GeneralConfig;
use env_logger::{Env, Target};
use once_cell::sync::OnceCell;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Log file chosen at startup, if one could be opened
static LOG_FILE_PATH: OnceCell<PathBuf> = OnceCell::new();

/// Writer that duplicates log output into an optional file
pub struct TeeWriter<W: Write> {
    console: W,
    file: Option<File>,
}

impl<W: Write> TeeWriter<W> {
    pub fn new(console: W, file: Option<File>) -> Self {
        Self { console, file }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = self.console.write_all(buf);
        if let Some(file) = self.file.as_mut() {
            if file.write_all(buf).is_err() {
                // Stop trying after the first failure
                self.file = None;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = self.console.flush();
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

/// Platform default log location (~/.local/share/cgui/log/debug.log on Linux)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("cgui").join("log").join("debug.log"))
}

/// Open the log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path, truncate: bool) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if truncate {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options.open(path)
}

/// Install the global logger
///
/// Returns the path of the log file when one is in use.
pub fn init(general: &GeneralConfig, debug: bool) -> Option<PathBuf> {
    let level = if debug { "debug" } else { general.log_level.as_str() };

    let path = general.log_file.clone().or_else(default_log_path);
    let file = path.as_deref().and_then(|p| match open_log_file(p, general.clear_log_on_start) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Unable to open log file {}: {}", p.display(), e);
            None
        }
    });
    let active_path = if file.is_some() { path } else { None };

    let result = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(TeeWriter::new(io::stderr(), file))))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }

    if let Some(p) = &active_path {
        let _ = LOG_FILE_PATH.set(p.clone());
    }
    active_path
}

/// Log file in use by the global logger
pub fn log_file_path() -> Option<&'static Path> {
    LOG_FILE_PATH.get().map(PathBuf::as_path)
}
