//! Background write-back of fetched tiles to the local cache.
//!
//! Writes are fire-and-forget tasks on the source's runtime. A failed write
//! is logged and dropped; it is never retried and never reported to the
//! caller that triggered the fetch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error};

use super::error::PersistError;
use crate::coord::TilePosition;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persists fetched tile payloads without blocking the caller.
#[derive(Clone)]
pub struct TileWriter {
    runtime: Handle,
    pending: Arc<AtomicUsize>,
}

impl TileWriter {
    /// Creates a writer that spawns onto `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Schedules `bytes` to be written to `path`.
    ///
    /// Returns immediately. The parent directory is created if absent.
    pub fn persist(&self, pos: TilePosition, path: PathBuf, bytes: Vec<u8>) {
        let pending = Arc::clone(&self.pending);
        pending.fetch_add(1, Ordering::SeqCst);

        self.runtime.spawn(async move {
            match write_atomic(&path, &bytes).await {
                Ok(()) => debug!(
                    tile = %pos.file_name(),
                    path = %path.display(),
                    bytes = bytes.len(),
                    "Saved tile to local cache"
                ),
                Err(e) => error!(
                    tile = %pos.file_name(),
                    error = %e,
                    "Failed to save tile to local cache"
                ),
            }
            pending.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Number of writes scheduled but not yet finished.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Writes to a sibling temporary file, then renames it over `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| PersistError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    let tmp = temp_path(path);
    if let Err(source) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(PersistError::Write { path: tmp, source });
    }

    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(PersistError::Rename {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn wait_idle(writer: &TileWriter) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while writer.pending() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(writer.pending(), 0, "writes did not finish");
    }

    #[test]
    fn test_persist_creates_directory_and_file() {
        let rt = runtime();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("f_1_2_.txt");
        let writer = TileWriter::new(rt.handle().clone());

        writer.persist(TilePosition::new(1, 2), path.clone(), vec![1, 2, 3]);
        wait_idle(&writer);

        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_persist_leaves_no_temp_files() {
        let rt = runtime();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f_0_0_.txt");
        let writer = TileWriter::new(rt.handle().clone());

        writer.persist(TilePosition::new(0, 0), path.clone(), vec![7; 64]);
        writer.persist(TilePosition::new(0, 0), path.clone(), vec![7; 64]);
        wait_idle(&writer);

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("f_0_0_.txt")]);
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        let rt = runtime();
        let dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let writer = TileWriter::new(rt.handle().clone());

        writer.persist(TilePosition::new(0, 0), blocker.join("f_0_0_.txt"), vec![1]);
        wait_idle(&writer);

        assert!(!blocker.join("f_0_0_.txt").exists());
    }

    #[test]
    fn test_temp_path_is_sibling_and_unique() {
        let path = Path::new("/cache/f_3_4_.txt");
        let a = temp_path(path);
        let b = temp_path(path);
        assert_eq!(a.parent(), path.parent());
        assert_ne!(a, b);
    }
}
