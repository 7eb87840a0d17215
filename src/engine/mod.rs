// Wed Oct 14 2026 - Alex

pub mod error;
pub mod handler;
pub mod message;
pub mod pool;
pub mod result;
pub mod task;
pub mod worker;

pub use error::TaskError;
pub use handler::{HandlerFn, WorkerHandler};
pub use message::{WorkerCommand, WorkerRequest, WorkerResponse};
pub use pool::{PoolStats, WorkerPool};
pub use result::{Pending, Settler, TaskResult};
pub use task::TaskRecord;
pub use worker::{Completion, Worker};
