// Wed Oct 14 2026 - Alex

pub mod cache;
pub mod scanner;
pub mod task;

pub use cache::ProcessCache;
pub use scanner::{MemoryScanner, ProcessMemory, RegionFilter, ScanError, ScanOptions};
pub use task::{memory_handler, scan_region, MemoryTask, ScanTask};
