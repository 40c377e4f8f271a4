//! Logging setup for the `landcover` binary.
//!
//! Writes to `<log_dir>/<log_file>` (cleared on start) and to stderr.
//! The level is taken from `RUST_LOG`, defaulting to `info`.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the file writer alive; dropping it flushes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Default log directory (`<user cache dir>/landcover/logs`).
pub fn default_log_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("landcover")
        .join("logs")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "landcover.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert!(default_log_dir().ends_with("landcover/logs"));
        assert_eq!(default_log_file(), "landcover.log");
    }

    // The global subscriber can only be installed once per process, so this
    // is the only test that calls `init_logging`.
    #[test]
    fn test_init_clears_previous_log() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        std::fs::create_dir_all(&log_dir).unwrap();
        std::fs::write(log_dir.join("test.log"), "old log data").unwrap();

        let guard = init_logging(&log_dir, "test.log").unwrap();
        assert!(std::fs::read_to_string(log_dir.join("test.log"))
            .unwrap()
            .is_empty());
        drop(guard);

        assert!(init_logging(&log_dir, "test.log").is_err());
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(init_logging(&blocker.join("logs"), "test.log").is_err());
    }
}
