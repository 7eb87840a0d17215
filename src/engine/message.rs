// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};

/// A task sent to a worker, correlated to its reply by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "request")]
pub struct WorkerRequest<Req> {
    pub id: u64,
    pub name: String,
    pub request: Req,
}

/// The single reply a worker sends for each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse<Res> {
    Done {
        id: u64,
        response: Res,
    },
    Error {
        id: u64,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
    },
}

impl<Res> WorkerResponse<Res> {
    pub fn id(&self) -> u64 {
        match self {
            Self::Done { id, .. } | Self::Error { id, .. } => *id,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// What the pool puts on a worker's inbound channel.
#[derive(Debug)]
pub enum WorkerCommand<Req> {
    Run(WorkerRequest<Req>),
    Terminate,
}
