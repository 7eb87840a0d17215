// Wed Oct 14 2026 - Alex

use crate::engine::error::TaskError;
use crate::engine::handler::WorkerHandler;
use crate::engine::message::{WorkerRequest, WorkerResponse};
use crate::engine::result::Pending;
use crate::engine::task::TaskRecord;
use crate::engine::worker::{Completion, Worker};
use ahash::AHashMap;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub workers: usize,
    pub idle: usize,
    pub busy: usize,
    pub queued: usize,
    pub pending: usize,
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
}

/// Backlog, idle set and pending table, only ever touched together.
struct Scheduler<Req, Res> {
    workers: Vec<Worker<Req>>,
    idle: Vec<usize>,
    backlog: VecDeque<u64>,
    pending: AHashMap<u64, TaskRecord<Req, Res>>,
    next_id: u64,
    closed: bool,
    submitted: u64,
    completed: u64,
    failed: u64,
}

impl<Req, Res> Scheduler<Req, Res> {
    /// Hands the oldest queued tasks to idle workers.
    fn drain(&mut self) {
        if self.closed {
            return;
        }

        while !self.backlog.is_empty() {
            let Some(worker) = self.idle.pop() else {
                break;
            };
            let Some(id) = self.backlog.pop_front() else {
                break;
            };
            let Some(record) = self.pending.get_mut(&id) else {
                self.idle.push(worker);
                continue;
            };
            let Some(request) = record.start(worker) else {
                self.idle.push(worker);
                continue;
            };

            let name = record.name.clone();
            debug!("Dispatching task {} ({}) to worker {}", id, name, worker);
            if !self.workers[worker].dispatch(WorkerRequest { id, name, request }) {
                warn!("Worker {} is gone, failing task {}", worker, id);
                if let Some(record) = self.pending.remove(&id) {
                    self.failed += 1;
                    record.settle(Err(TaskError::Failed {
                        message: format!("Worker {} exited", worker),
                        trace: None,
                    }));
                }
            }
        }
    }

    fn on_worker_message(&mut self, completion: Completion<Res>) {
        let Completion { worker, response } = completion;
        self.idle.push(worker);

        match self.pending.remove(&response.id()) {
            Some(mut record) => {
                record.finish();
                debug!(
                    "Task {} ({}) finished on worker {} after {:?} queued, {:?} running",
                    record.id,
                    record.name,
                    worker,
                    record.queue_time().unwrap_or_default(),
                    record.run_time().unwrap_or_default()
                );
                match response {
                    WorkerResponse::Done { response, .. } => {
                        self.completed += 1;
                        record.settle(Ok(response));
                    }
                    WorkerResponse::Error { message, trace, .. } => {
                        self.failed += 1;
                        record.settle(Err(TaskError::Failed { message, trace }));
                    }
                }
            }
            None => warn!("Worker {} replied to unknown task {}", worker, response.id()),
        }

        self.drain();
    }

    fn stats(&self) -> PoolStats {
        let workers = self.workers.len();
        let idle = self.idle.len();
        PoolStats {
            workers,
            idle,
            busy: workers - idle,
            queued: self.backlog.len(),
            pending: self.pending.len(),
            submitted: self.submitted,
            completed: self.completed,
            failed: self.failed,
        }
    }
}

/// Fixed set of worker threads fed from one FIFO backlog.
pub struct WorkerPool<Req, Res> {
    scheduler: Arc<Mutex<Scheduler<Req, Res>>>,
    threads: Vec<JoinHandle<()>>,
    collector: Option<JoinHandle<()>>,
}

impl<Req, Res> WorkerPool<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    /// Spawns `width` workers, each with the handler table `factory` builds for it.
    pub fn new<F>(width: usize, factory: F) -> io::Result<Self>
    where
        F: Fn(usize) -> WorkerHandler<Req, Res>,
    {
        if width == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "pool width must be greater than 0"));
        }

        let (completions, inbox) = mpsc::channel::<Completion<Res>>();
        let mut workers = Vec::with_capacity(width);
        let mut threads = Vec::with_capacity(width);
        for id in 0..width {
            let mut worker = Worker::spawn(factory(id), completions.clone())?;
            threads.extend(worker.take_thread());
            workers.push(worker);
        }
        drop(completions);

        let scheduler = Arc::new(Mutex::new(Scheduler {
            workers,
            idle: (0..width).rev().collect(),
            backlog: VecDeque::new(),
            pending: AHashMap::new(),
            next_id: 0,
            closed: false,
            submitted: 0,
            completed: 0,
            failed: 0,
        }));

        let shared = Arc::clone(&scheduler);
        let collector = thread::Builder::new()
            .name("memscan-collector".to_string())
            .spawn(move || {
                for completion in inbox {
                    shared.lock().on_worker_message(completion);
                }
            })?;

        debug!("Started worker pool with {} workers", width);
        Ok(Self {
            scheduler,
            threads,
            collector: Some(collector),
        })
    }

    /// Queues a task and returns a handle to its eventual result.
    pub fn submit(&self, name: &str, request: Req) -> Pending<Res> {
        let mut scheduler = self.scheduler.lock();
        let id = scheduler.next_id;
        scheduler.next_id += 1;

        let (settler, pending) = Pending::channel(id);
        if scheduler.closed {
            settler.settle(Err(TaskError::Closed));
            return pending;
        }

        scheduler
            .pending
            .insert(id, TaskRecord::new(id, name.to_string(), request, settler));
        scheduler.backlog.push_back(id);
        scheduler.submitted += 1;
        scheduler.drain();
        pending
    }

    pub fn stats(&self) -> PoolStats {
        self.scheduler.lock().stats()
    }

    pub fn width(&self) -> usize {
        self.scheduler.lock().workers.len()
    }
}

impl<Req, Res> WorkerPool<Req, Res> {
    /// Stops every worker once its current task is done.
    ///
    /// Handles of tasks that never reached a worker resolve to
    /// [`TaskError::Closed`].
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        {
            let mut scheduler = self.scheduler.lock();
            if scheduler.closed {
                return;
            }
            scheduler.closed = true;
            for worker in &scheduler.workers {
                worker.terminate();
            }
        }

        for thread in self.threads.drain(..) {
            let _ = thread.join();
        }

        // the collector ends once every worker has dropped its sender
        if let Some(collector) = self.collector.take() {
            let _ = collector.join();
        }

        let mut scheduler = self.scheduler.lock();
        scheduler.backlog.clear();
        let abandoned = scheduler.pending.len();
        for (_, record) in scheduler.pending.drain() {
            record.settle(Err(TaskError::Closed));
        }
        debug!("Worker pool closed, {} unsettled tasks abandoned", abandoned);
    }
}

impl<Req, Res> Drop for WorkerPool<Req, Res> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
