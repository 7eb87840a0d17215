// Wed Oct 14 2026 - Alex

use crate::engine::error::TaskError;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::time::Duration;

pub type TaskResult<T> = Result<T, TaskError>;

/// Sending half of a [`Pending`]. Consumed by the single settlement.
#[derive(Debug)]
pub struct Settler<T> {
    sender: SyncSender<TaskResult<T>>,
}

impl<T> Settler<T> {
    pub fn settle(self, result: TaskResult<T>) {
        // the caller may have dropped its handle
        let _ = self.sender.send(result);
    }
}

/// Handle to a submitted task. Settles exactly once.
#[derive(Debug)]
pub struct Pending<T> {
    id: u64,
    receiver: Receiver<TaskResult<T>>,
}

impl<T> Pending<T> {
    pub fn channel(id: u64) -> (Settler<T>, Pending<T>) {
        let (sender, receiver) = mpsc::sync_channel(1);
        (Settler { sender }, Pending { id, receiver })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Blocks until the task settles.
    pub fn wait(self) -> TaskResult<T> {
        self.receiver.recv().unwrap_or(Err(TaskError::Closed))
    }

    /// `None` if the task has not settled within `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<TaskResult<T>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(TaskError::Closed)),
        }
    }

    pub fn try_wait(&self) -> Option<TaskResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TaskError::Closed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_then_wait() {
        let (settler, pending) = Pending::channel(3);
        assert_eq!(pending.id(), 3);
        assert!(pending.try_wait().is_none());

        settler.settle(Ok(42u32));
        assert_eq!(pending.wait(), Ok(42));
    }

    #[test]
    fn test_dropped_settler_is_closed() {
        let (settler, pending) = Pending::<u32>::channel(1);
        drop(settler);
        assert_eq!(pending.try_wait(), Some(Err(TaskError::Closed)));
        assert_eq!(pending.wait(), Err(TaskError::Closed));
    }

    #[test]
    fn test_wait_timeout() {
        let (settler, pending) = Pending::<u32>::channel(1);
        assert!(pending.wait_timeout(Duration::from_millis(10)).is_none());
        settler.settle(Err(TaskError::UnknownCommand("dump".to_string())));
        assert_eq!(
            pending.wait_timeout(Duration::from_millis(10)),
            Some(Err(TaskError::UnknownCommand("dump".to_string())))
        );
    }
}
