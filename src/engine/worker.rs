// Wed Oct 14 2026 - Alex

use crate::engine::handler::WorkerHandler;
use crate::engine::message::{WorkerCommand, WorkerRequest, WorkerResponse};
use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

/// A reply tagged with the worker that produced it.
#[derive(Debug)]
pub struct Completion<Res> {
    pub worker: usize,
    pub response: WorkerResponse<Res>,
}

/// One worker thread and its inbound channel.
pub struct Worker<Req> {
    id: usize,
    sender: Sender<WorkerCommand<Req>>,
    thread: Option<JoinHandle<()>>,
}

impl<Req: Send + 'static> Worker<Req> {
    pub fn spawn<Res: Send + 'static>(
        handler: WorkerHandler<Req, Res>,
        completions: Sender<Completion<Res>>,
    ) -> io::Result<Self> {
        let id = handler.worker();
        let (sender, inbound) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(format!("memscan-worker-{}", id))
            .spawn(move || handler.bind(inbound, completions))?;

        Ok(Self {
            id,
            sender,
            thread: Some(thread),
        })
    }
}

impl<Req> Worker<Req> {
    pub fn id(&self) -> usize {
        self.id
    }

    /// False if the worker thread is gone.
    pub fn dispatch(&self, request: WorkerRequest<Req>) -> bool {
        self.sender.send(WorkerCommand::Run(request)).is_ok()
    }

    pub fn terminate(&self) {
        let _ = self.sender.send(WorkerCommand::Terminate);
    }

    pub fn take_thread(&mut self) -> Option<JoinHandle<()>> {
        self.thread.take()
    }
}
