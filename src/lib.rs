// Wed Oct 14 2026 - Alex

pub mod config;
pub mod engine;
pub mod memory;
pub mod orchestrator;
pub mod pattern;
pub mod utils;

pub use config::Config;
pub use engine::{Pending, PoolStats, TaskError, WorkerHandler, WorkerPool};
pub use memory::{MemoryError, MemoryRegion, Pid, ProcessHandle, ProcessList};
pub use orchestrator::{MemoryScanner, ProcessMemory, ScanError, ScanOptions};
pub use pattern::{Criterion, NumericFormat, Pattern, PatternError};
