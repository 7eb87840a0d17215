// Wed Oct 14 2026 - Alex

use crate::engine::result::{Settler, TaskResult};
use std::time::{Duration, Instant};

/// Pool-side bookkeeping for one submitted task.
#[derive(Debug)]
pub struct TaskRecord<Req, Res> {
    pub id: u64,
    pub name: String,
    request: Option<Req>,
    settler: Settler<Res>,
    pub queued_at: Instant,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
    pub worker: Option<usize>,
}

impl<Req, Res> TaskRecord<Req, Res> {
    pub fn new(id: u64, name: String, request: Req, settler: Settler<Res>) -> Self {
        Self {
            id,
            name,
            request: Some(request),
            settler,
            queued_at: Instant::now(),
            started_at: None,
            ended_at: None,
            worker: None,
        }
    }

    /// Marks the record as running on `worker` and hands out the request.
    pub fn start(&mut self, worker: usize) -> Option<Req> {
        self.started_at = Some(Instant::now());
        self.worker = Some(worker);
        self.request.take()
    }

    pub fn finish(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn queue_time(&self) -> Option<Duration> {
        self.started_at.map(|started| started.duration_since(self.queued_at))
    }

    pub fn run_time(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(started), Some(ended)) => Some(ended.duration_since(started)),
            _ => None,
        }
    }

    pub fn settle(self, result: TaskResult<Res>) {
        self.settler.settle(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::result::Pending;

    #[test]
    fn test_record_lifecycle() {
        let (settler, pending) = Pending::channel(1);
        let mut record = TaskRecord::new(1, "scan".to_string(), 7u32, settler);
        assert!(!record.is_started());
        assert!(record.queue_time().is_none());

        assert_eq!(record.start(2), Some(7));
        assert_eq!(record.start(2), None);
        assert_eq!(record.worker, Some(2));
        assert!(record.queue_time().is_some());
        assert!(record.run_time().is_none());

        record.finish();
        assert!(record.run_time().is_some());
        record.settle(Ok("done".to_string()));
        assert_eq!(pending.wait(), Ok("done".to_string()));
    }
}
