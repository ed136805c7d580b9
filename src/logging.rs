// Conditional logging macros - only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "wordle-six.log";

/// Where the log goes when the terminal is owned by the TUI.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    crate::app_data_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogTarget {
    /// An explicit file always wins. A full-screen session never logs to
    /// stderr: it uses `fallback` when there is one and is silent otherwise.
    #[must_use]
    pub fn select(explicit: Option<PathBuf>, full_screen: bool, fallback: Option<PathBuf>) -> Self {
        match (explicit, full_screen) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => fallback.map_or(LogTarget::Off, LogTarget::File),
            (None, false) => LogTarget::Stderr,
        }
    }
}

/// Install the global logger. The level comes from `RUST_LOG` (default `warn`).
/// File targets are appended to; `LogTarget::Off` disables every record.
///
/// # Errors
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init_logging(target: &LogTarget) -> io::Result<()> {
    if *target == LogTarget::Off {
        return env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .try_init()
            .map_err(io::Error::other);
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr | LogTarget::Off => {}
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    builder.try_init().map_err(io::Error::other)
}
