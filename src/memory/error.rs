// Tue Oct 13 2026 - Alex

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while talking to a process through procfs.
///
/// Sources are kept behind `Arc` so a single failed refresh can be handed to
/// every caller that was waiting on it.
#[derive(Error, Debug, Clone)]
pub enum MemoryError {
    #[error("Resource unavailable: {}: {}", .path.display(), .source)]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Failed to read memory at: 0x{offset:x} - {source}")]
    ReadFailure {
        offset: u64,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Invalid memory range: {0}")]
    InvalidRange(String),
}

impl MemoryError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn read_failure(offset: u64, source: io::Error) -> Self {
        Self::ReadFailure {
            offset,
            source: Arc::new(source),
        }
    }

    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::ReadFailure { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
