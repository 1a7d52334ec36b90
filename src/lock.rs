//! Guarding the data directory.
//!
//! A checklist invocation takes exactly one lock: `checklist.lock` inside the
//! data directory, acquired by [`crate::storage::Storage::read`] or
//! [`crate::storage::Storage::update`] and held until the store has been
//! loaded and, for mutations, saved again. Two processes therefore never
//! interleave their load/save cycles. The data files themselves are replaced
//! with [`write_atomic`], so even a reader that skips the lock sees a whole
//! file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Error, Result};

/// How long a command waits for the data directory lock unless configured
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Exclusive hold on the data directory for one command.
///
/// Dropping the guard releases the lock; so does process exit.
#[derive(Debug)]
pub struct DataLock {
    file: File,
}

impl DataLock {
    /// Lock the file at `path`, polling until `timeout_ms` has elapsed.
    ///
    /// The file and its parent directories are created on first use. A
    /// timeout too large to represent waits indefinitely.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        let deadline = Instant::now().checked_add(Duration::from_millis(timeout_ms));
        while let Err(err) = file.try_lock_exclusive() {
            if !held_by_someone_else(&err) {
                return Err(Error::Io(err));
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::debug!(path = %path.display(), timeout_ms, "gave up waiting for lock");
                return Err(Error::LockFailed(path.to_path_buf()));
            }
            thread::sleep(POLL_INTERVAL);
        }

        tracing::debug!(path = %path.display(), "data directory locked");
        Ok(Self { file })
    }
}

impl Drop for DataLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn held_by_someone_else(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || (err.raw_os_error().is_some()
            && err.raw_os_error() == fs2::lock_contended_error().raw_os_error())
}

/// Replace `path` with `data` via a hidden sibling temp file and a rename.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let staging = staging_path(path)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut file = File::create(&staging)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&staging, path)?;
    Ok(())
}

// `.items.json.<pid>.tmp` next to `items.json`; the pid keeps concurrent
// writers that ignore the lock from sharing a staging file.
fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no file name in {}", path.display()),
        ))
    })?;
    Ok(path.with_file_name(format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        std::process::id()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn second_holder_times_out_until_first_drops() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checklist.lock");

        let held = DataLock::acquire(&path, 1000).unwrap();
        assert!(path.exists());
        assert!(matches!(DataLock::acquire(&path, 30), Err(Error::LockFailed(p)) if p == path));

        drop(held);
        assert!(DataLock::acquire(&path, 30).is_ok());
    }

    #[test]
    fn creates_data_dir_on_first_use() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh").join("data").join("checklist.lock");

        let _held = DataLock::acquire(&path, 1000).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unrepresentable_timeout_still_locks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checklist.lock");
        assert!(DataLock::acquire(&path, u64::MAX).is_ok());
    }

    #[test]
    fn waiter_on_another_thread_gets_the_lock_after_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("checklist.lock");

        let held = DataLock::acquire(&path, 1000).unwrap();
        let contended = path.clone();
        let waiter = thread::spawn(move || DataLock::acquire(&contended, 2000).is_ok());

        thread::sleep(Duration::from_millis(100));
        drop(held);
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn write_atomic_replaces_contents_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");

        write_atomic(&path, b"{}").unwrap();
        write_atomic(&path, b"{\"0\":{\"title\":\"a\"}}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"0\":{\"title\":\"a\"}}");

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["items.json".to_string()]);
    }

    #[test]
    fn staging_file_is_hidden_sibling() {
        let staging = staging_path(Path::new("/data/counter.txt")).unwrap();
        assert_eq!(staging.parent(), Some(Path::new("/data")));
        let name = staging.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".counter.txt."));
        assert!(name.ends_with(".tmp"));
        assert!(staging_path(Path::new("/")).is_err());
    }
}
