// Tue Oct 13 2026 - Alex

use crate::memory::MemoryError;
use log::{debug, warn};
use parking_lot::Mutex;
use std::fs::File;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

/// Lazily opened read handle on a memory pseudo-file.
///
/// The file is opened on first use and shared by every caller. A background
/// reaper closes it once it has been idle for `idle_timeout`; the next access
/// reopens it.
pub struct MemoryAccess {
    path: PathBuf,
    idle_timeout: Duration,
    state: Arc<Mutex<AccessState>>,
}

struct AccessState {
    file: Option<Arc<File>>,
    last_access: Instant,
    epoch: u64,
}

impl MemoryAccess {
    pub fn new(path: impl Into<PathBuf>, idle_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            idle_timeout,
            state: Arc::new(Mutex::new(AccessState {
                file: None,
                last_access: Instant::now(),
                epoch: 0,
            })),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().file.is_some()
    }

    /// Number of times the file has been opened so far.
    pub fn open_count(&self) -> u64 {
        self.state.lock().epoch
    }

    pub fn file(&self) -> Result<Arc<File>, MemoryError> {
        let mut state = self.state.lock();
        state.last_access = Instant::now();

        if let Some(file) = &state.file {
            return Ok(file.clone());
        }

        let file = File::open(&self.path).map_err(|e| MemoryError::unavailable(&self.path, e))?;
        let file = Arc::new(file);
        state.file = Some(file.clone());
        state.epoch += 1;
        debug!("Opened {} (open #{})", self.path.display(), state.epoch);

        self.spawn_reaper(state.epoch);
        Ok(file)
    }

    /// Positioned read of up to `len` bytes at `offset`.
    ///
    /// Reading nothing at all, or hitting any I/O error, fails the call. A read
    /// cut short after some bytes arrived returns what was read.
    pub fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>, MemoryError> {
        if len == 0 {
            return Err(MemoryError::InvalidRange(format!("zero-length read at 0x{:x}", offset)));
        }

        let file = self.file()?;
        let mut buf = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            match file.read_at(&mut buf[filled..], offset + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(MemoryError::read_failure(offset, e)),
            }
        }

        if filled == 0 {
            return Err(MemoryError::read_failure(
                offset,
                io::Error::new(io::ErrorKind::UnexpectedEof, "zero bytes read"),
            ));
        }

        buf.truncate(filled);
        Ok(buf)
    }

    /// Drops the cached file right away.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.file.take().is_some() {
            debug!("Closed {}", self.path.display());
        }
    }

    fn spawn_reaper(&self, epoch: u64) {
        let state = Arc::downgrade(&self.state);
        let timeout = self.idle_timeout;
        let path = self.path.clone();

        let spawned = thread::Builder::new()
            .name("memscan-reaper".to_string())
            .spawn(move || reap_when_idle(state, epoch, timeout, path));

        if let Err(e) = spawned {
            warn!("Could not start idle reaper for {}: {}", self.path.display(), e);
        }
    }
}

fn reap_when_idle(state: Weak<Mutex<AccessState>>, epoch: u64, timeout: Duration, path: PathBuf) {
    let mut wait = timeout;
    loop {
        thread::sleep(wait);

        let Some(shared) = state.upgrade() else {
            return;
        };
        let mut guard = shared.lock();
        if guard.epoch != epoch || guard.file.is_none() {
            return;
        }

        let idle = guard.last_access.elapsed();
        if idle >= timeout {
            guard.file = None;
            debug!("Closed {} after {:?} idle", path.display(), idle);
            return;
        }
        wait = timeout - idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mem");
        fs::write(&path, bytes).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_at_offset() {
        let (_dir, path) = fixture(b"0123456789");
        let access = MemoryAccess::new(&path, Duration::from_secs(5));

        assert_eq!(access.read_at(3, 4).unwrap(), b"3456");
        assert_eq!(access.read_at(0, 2).unwrap(), b"01");
        assert_eq!(access.open_count(), 1);
    }

    #[test]
    fn test_short_read_is_truncated() {
        let (_dir, path) = fixture(b"abcdef");
        let access = MemoryAccess::new(&path, Duration::from_secs(5));
        assert_eq!(access.read_at(4, 16).unwrap(), b"ef");
    }

    #[test]
    fn test_zero_byte_read_fails_with_offset() {
        let (_dir, path) = fixture(b"abc");
        let access = MemoryAccess::new(&path, Duration::from_secs(5));

        let err = access.read_at(0x40, 4).unwrap_err();
        assert_eq!(err.offset(), Some(0x40));
        assert!(err.to_string().contains("0x40"));

        // the handle survives the failure
        assert!(access.is_open());
        assert_eq!(access.read_at(0, 3).unwrap(), b"abc");
        assert_eq!(access.open_count(), 1);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let access = MemoryAccess::new(dir.path().join("missing"), Duration::from_secs(5));
        let err = access.read_at(0, 1).unwrap_err();
        assert!(matches!(err, MemoryError::ResourceUnavailable { .. }));
        assert!(!access.is_open());
    }

    #[test]
    fn test_idle_handle_is_closed_and_reopened() {
        let (_dir, path) = fixture(b"abc");
        let access = MemoryAccess::new(&path, Duration::from_millis(50));

        access.read_at(0, 1).unwrap();
        assert!(access.is_open());

        thread::sleep(Duration::from_millis(300));
        assert!(!access.is_open());

        assert_eq!(access.read_at(1, 2).unwrap(), b"bc");
        assert!(access.is_open());
        assert_eq!(access.open_count(), 2);
    }
}
