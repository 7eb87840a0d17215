// Wed Oct 14 2026 - Alex

use crate::config::Config;
use crate::engine::{PoolStats, TaskError, WorkerPool};
use crate::memory::{MemoryError, MemoryRegion, Pid, ProcessHandle};
use crate::orchestrator::task::{memory_handler, MemoryTask, ScanTask};
use crate::pattern::{Criterion, Pattern, PatternError};
use crate::utils::{hex_dump, ScopedTimer};
use log::{debug, warn};
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("Scan of region 0x{start:x}-0x{end:x} failed: {source}")]
    Region {
        start: u64,
        end: u64,
        #[source]
        source: TaskError,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to start workers: {0}")]
    Startup(#[from] io::Error),
}

pub type RegionFilter = Arc<dyn Fn(&MemoryRegion) -> bool + Send + Sync>;

/// Which regions to search and how to judge matches.
#[derive(Clone, Default)]
pub struct ScanOptions {
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub filter: Option<RegionFilter>,
    pub criteria: Vec<Criterion>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_size(mut self, size: u64) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&MemoryRegion) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn admits(&self, region: &MemoryRegion) -> bool {
        let size = region.size();
        if self.min_size.is_some_and(|min| size < min) {
            return false;
        }
        if self.max_size.is_some_and(|max| size > max) {
            return false;
        }
        self.filter.as_ref().map_or(true, |filter| filter(region))
    }
}

impl fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanOptions")
            .field("min_size", &self.min_size)
            .field("max_size", &self.max_size)
            .field("filter", &self.filter.is_some())
            .field("criteria", &self.criteria)
            .finish()
    }
}

/// Splits process memory into per-region tasks and runs them on a worker pool.
pub struct MemoryScanner {
    config: Config,
    pool: WorkerPool<MemoryTask, Vec<u64>>,
}

impl MemoryScanner {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        config.validate().map_err(ScanError::Config)?;

        let worker_config = config.clone();
        let pool = WorkerPool::new(config.threads, move |worker| memory_handler(worker, worker_config.clone()))?;

        Ok(Self {
            config: config.clone(),
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// First process whose display name contains `name`.
    pub fn find(&self, name: &str) -> Result<Option<ProcessMemory<'_>>, ScanError> {
        let handle = ProcessHandle::find_by_name(name, &self.config)?;
        Ok(handle.map(|handle| ProcessMemory { handle, scanner: self }))
    }

    pub fn attach(&self, pid: Pid) -> ProcessMemory<'_> {
        ProcessMemory {
            handle: ProcessHandle::from_pid(pid, &self.config),
            scanner: self,
        }
    }

    /// Addresses in `handle` where `pattern` matches, in region order.
    pub fn scan(&self, handle: &ProcessHandle, pattern: &str, options: &ScanOptions) -> Result<Vec<u64>, ScanError> {
        let pattern = Pattern::compile(pattern)?;
        self.scan_pattern(handle, &pattern, options)
    }

    pub fn scan_bytes(&self, handle: &ProcessHandle, bytes: &[u8], options: &ScanOptions) -> Result<Vec<u64>, ScanError> {
        let pattern = Pattern::from_bytes(bytes)?;
        self.scan_pattern(handle, &pattern, options)
    }

    pub fn scan_pattern(
        &self,
        handle: &ProcessHandle,
        pattern: &Pattern,
        options: &ScanOptions,
    ) -> Result<Vec<u64>, ScanError> {
        let _timer = ScopedTimer::new(format!("scan of {} for {}", handle, pattern));
        let regions = handle.load_regions()?;

        let tasks: Vec<_> = regions
            .iter()
            .filter(|region| options.admits(region))
            .map(|region| {
                let task = ScanTask {
                    pid: handle.pid(),
                    start: region.start(),
                    end: region.end(),
                    pattern: pattern.clone(),
                    criteria: options.criteria.clone(),
                };
                let pending = self.pool.submit(MemoryTask::SCAN, MemoryTask::Scan(task));
                (region.start(), region.end(), pending)
            })
            .collect();
        debug!("Submitted {} of {} regions of {}", tasks.len(), regions.len(), handle);

        let mut addresses = Vec::new();
        for (start, end, pending) in tasks {
            match pending.wait() {
                Ok(found) => addresses.extend(found),
                Err(source) => {
                    warn!("Region 0x{:x}-0x{:x} of {} failed: {}", start, end, handle, source);
                    return Err(ScanError::Region { start, end, source });
                }
            }
        }
        Ok(addresses)
    }

    pub fn close(self) {
        self.pool.close();
    }
}

/// A resolved process bound to the scanner that searches it.
pub struct ProcessMemory<'a> {
    handle: ProcessHandle,
    scanner: &'a MemoryScanner,
}

impl<'a> ProcessMemory<'a> {
    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    pub fn pid(&self) -> Pid {
        self.handle.pid()
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn regions(&self) -> Result<Arc<Vec<MemoryRegion>>, MemoryError> {
        self.handle.load_regions()
    }

    pub fn read(&self, offset: u64, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.handle.read(offset, len)
    }

    /// Hex dump of `len` bytes at `offset`.
    pub fn dump(&self, offset: u64, len: usize) -> Result<String, MemoryError> {
        let bytes = self.read(offset, len)?;
        Ok(hex_dump(&bytes, offset))
    }

    pub fn scan(&self, pattern: &str, options: &ScanOptions) -> Result<Vec<u64>, ScanError> {
        self.scanner.scan(&self.handle, pattern, options)
    }

    pub fn scan_bytes(&self, bytes: &[u8], options: &ScanOptions) -> Result<Vec<u64>, ScanError> {
        self.scanner.scan_bytes(&self.handle, bytes, options)
    }
}

impl fmt::Display for ProcessMemory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.handle, f)
    }
}
