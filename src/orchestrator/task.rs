// Wed Oct 14 2026 - Alex

use crate::config::Config;
use crate::engine::WorkerHandler;
use crate::memory::Pid;
use crate::orchestrator::cache::ProcessCache;
use crate::pattern::{self, Criterion, Pattern};
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// One region of one process to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTask {
    pub pid: Pid,
    pub start: u64,
    pub end: u64,
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
}

/// Every task the memory workers understand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "request", rename_all = "lowercase")]
pub enum MemoryTask {
    Scan(ScanTask),
}

impl MemoryTask {
    pub const SCAN: &'static str = "scan";

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scan(_) => Self::SCAN,
        }
    }
}

/// Handler table for one memory worker, with its own process cache.
pub fn memory_handler(worker: usize, config: Config) -> WorkerHandler<MemoryTask, Vec<u64>> {
    let mut processes = ProcessCache::new(config);
    WorkerHandler::new(worker).route(MemoryTask::SCAN, move |task| match task {
        MemoryTask::Scan(scan) => scan_region(&mut processes, &scan),
    })
}

/// Reads the task's region and returns absolute addresses of every accepted match.
pub fn scan_region(processes: &mut ProcessCache, task: &ScanTask) -> anyhow::Result<Vec<u64>> {
    ensure!(
        task.start < task.end,
        "Empty region 0x{:x}-0x{:x}",
        task.start,
        task.end
    );
    let len = usize::try_from(task.end - task.start).context("Region does not fit in memory")?;

    let process = processes.get(task.pid);
    let bytes = process
        .read(task.start, len)
        .with_context(|| format!("Failed to scan region 0x{:x}-0x{:x} of {}", task.start, task.end, task.pid))?;

    Ok(pattern::search(&bytes, &task.pattern, &task.criteria)
        .into_iter()
        .map(|offset| task.start + offset as u64)
        .collect())
}
