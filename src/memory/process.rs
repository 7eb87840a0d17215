// Tue Oct 13 2026 - Alex

use crate::config::Config;
use crate::memory::{MemoryAccess, MemoryError, MemoryRegion, TtlCache};
use log::{debug, trace};
use std::fmt;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub type Pid = libc::pid_t;

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const REGION_CACHE_TTL: Duration = Duration::from_secs(10);
pub const HANDLE_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

const UNKNOWN_NAME: &str = "unknown";

/// A process as seen through procfs.
///
/// Owns the cached region list and the cached handle on its memory file; both
/// are safe to use from several threads at once.
pub struct ProcessHandle {
    pid: Pid,
    name: String,
    root: PathBuf,
    regions: TtlCache<Vec<MemoryRegion>>,
    memory: MemoryAccess,
}

impl ProcessHandle {
    pub fn new(pid: Pid, name: &str, config: &Config) -> Self {
        let root = config.proc_root.clone();
        let memory = MemoryAccess::new(root.join(pid.to_string()).join("mem"), config.handle_idle_timeout());

        Self {
            pid,
            name: name.to_string(),
            root,
            regions: TtlCache::new(config.region_cache_ttl()),
            memory,
        }
    }

    /// Handle for a pid whose display name is not known.
    pub fn from_pid(pid: Pid, config: &Config) -> Self {
        Self::new(pid, UNKNOWN_NAME, config)
    }

    /// First process whose display name contains `name`.
    pub fn find_by_name(name: &str, config: &Config) -> Result<Option<Self>, MemoryError> {
        let entry = ProcessList::open(&config.proc_root)?
            .iter()?
            .find(|entry| entry.name.contains(name));

        Ok(entry.map(|entry| {
            debug!("Resolved '{}' to {} ({})", name, entry.pid, entry.name);
            Self::new(entry.pid, &entry.name, config)
        }))
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maps_path(&self) -> PathBuf {
        self.root.join(self.pid.to_string()).join("maps")
    }

    pub fn memory_path(&self) -> &Path {
        self.memory.path()
    }

    pub fn memory(&self) -> &MemoryAccess {
        &self.memory
    }

    /// Writable regions of the process, cached for the configured TTL.
    pub fn load_regions(&self) -> Result<Arc<Vec<MemoryRegion>>, MemoryError> {
        self.regions.get_or_refresh(|| self.parse_regions())
    }

    fn parse_regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        let path = self.maps_path();
        let data = fs::read_to_string(&path).map_err(|e| MemoryError::unavailable(&path, e))?;

        let mut regions = Vec::new();
        for line in data.lines().filter(|line| !line.trim().is_empty()) {
            match MemoryRegion::parse_line(line) {
                Some(region) if region.is_scannable() => regions.push(region),
                Some(_) => {}
                None => debug!("Skipping malformed maps line: {}", line),
            }
        }

        debug!("Loaded {} writable regions for pid {}", regions.len(), self.pid);
        Ok(regions)
    }

    /// Reads `len` bytes of process memory starting at `offset`.
    pub fn read(&self, offset: u64, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.memory.read_at(offset, len)
    }

    /// True if `offset` lies strictly inside one of the cached regions.
    pub fn is_within_mapped_region(&self, offset: u64) -> Result<bool, MemoryError> {
        let regions = self.load_regions()?;
        Ok(regions.iter().any(|region| region.contains_strictly(offset)))
    }

    pub fn region_containing(&self, offset: u64) -> Result<Option<MemoryRegion>, MemoryError> {
        let regions = self.load_regions()?;
        Ok(regions.iter().find(|region| region.contains(offset)).cloned())
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("name", &self.name)
            .field("root", &self.root)
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.pid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub name: String,
}

/// The process listing of a procfs root.
///
/// Each call to [`ProcessList::iter`] walks the directory again, lazily, so a
/// search can stop at the first hit.
pub struct ProcessList {
    root: PathBuf,
}

impl ProcessList {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        let root = root.into();
        if !root.is_dir() {
            let err = std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory");
            return Err(MemoryError::unavailable(&root, err));
        }
        Ok(Self { root })
    }

    pub fn iter(&self) -> Result<ProcessIter, MemoryError> {
        let entries = fs::read_dir(&self.root).map_err(|e| MemoryError::unavailable(&self.root, e))?;
        Ok(ProcessIter { entries })
    }
}

pub struct ProcessIter {
    entries: ReadDir,
}

impl Iterator for ProcessIter {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let Ok(entry) = entry else {
                continue;
            };
            let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse::<Pid>().ok()) else {
                continue;
            };

            match read_status_name(&entry.path().join("status")) {
                Some(name) => return Some(ProcessEntry { pid, name }),
                None => trace!("Skipping unreadable process entry {}", pid),
            }
        }
        None
    }
}

/// Second tab-separated field of the first line of a status file.
fn read_status_name(path: &Path) -> Option<String> {
    let data = fs::read_to_string(path).ok()?;
    let first = data.lines().next()?;
    first.split('\t').nth(1).map(|name| name.trim_end().to_string())
}
