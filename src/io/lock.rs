use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock serialising read-modify-write cycles on one task file.
///
/// Uses platform-native flock (Unix) so that two `tn` processes cannot
/// interleave a load and a save. The lock is released when dropped.
#[derive(Debug)]
pub struct FileLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another process may be writing")]
    Timeout { path: PathBuf },
}

impl FileLock {
    /// Acquire the lock guarding `task_file` (`<task_file>.lock`).
    /// Blocks up to `timeout` waiting for the lock.
    pub fn acquire(task_file: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = lock_path_for(task_file);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    tracing::trace!(path = %lock_path.display(), "lock acquired");
                    return Ok(FileLock {
                        _file: file,
                        path: lock_path,
                    });
                }
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => {
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with default timeout (5 seconds)
    pub fn acquire_default(task_file: &Path) -> Result<Self, LockError> {
        Self::acquire(task_file, Duration::from_secs(5))
    }
}

// The lock file is left in place on drop: unlinking it would let a waiting
// process lock an inode nobody else can see.
impl Drop for FileLock {
    fn drop(&mut self) {
        tracing::trace!(path = %self.path.display(), "lock released");
    }
}

/// `tasks.json` → `tasks.json.lock`
pub fn lock_path_for(task_file: &Path) -> PathBuf {
    let mut name = task_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "tasks".into());
    name.push(".lock");
    task_file.with_file_name(name)
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // Advisory only; no-op elsewhere
    Ok(())
}
