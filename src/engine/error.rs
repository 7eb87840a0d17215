// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{message}")]
    Failed { message: String, trace: Option<String> },
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Worker pool closed before the task settled")]
    Closed,
}

impl TaskError {
    pub fn trace(&self) -> Option<&str> {
        match self {
            Self::Failed { trace, .. } => trace.as_deref(),
            _ => None,
        }
    }
}
