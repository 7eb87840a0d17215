// Tue Oct 13 2026 - Alex

pub mod access;
pub mod cache;
pub mod error;
pub mod process;
pub mod protection;
pub mod region;

pub use access::MemoryAccess;
pub use cache::TtlCache;
pub use error::MemoryError;
pub use process::{Pid, ProcessEntry, ProcessHandle, ProcessList};
pub use protection::Protection;
pub use region::MemoryRegion;
