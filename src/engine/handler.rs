// Wed Oct 14 2026 - Alex

use crate::engine::error::TaskError;
use crate::engine::message::{WorkerCommand, WorkerRequest, WorkerResponse};
use crate::engine::worker::Completion;
use ahash::AHashMap;
use log::{debug, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

pub type HandlerFn<Req, Res> = Box<dyn FnMut(Req) -> anyhow::Result<Res> + Send>;

/// Task-name to handler table owned by one worker.
pub struct WorkerHandler<Req, Res> {
    worker: usize,
    routes: AHashMap<String, HandlerFn<Req, Res>>,
}

impl<Req, Res> WorkerHandler<Req, Res> {
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            routes: AHashMap::new(),
        }
    }

    pub fn route<F>(mut self, name: &str, handler: F) -> Self
    where
        F: FnMut(Req) -> anyhow::Result<Res> + Send + 'static,
    {
        self.routes.insert(name.to_string(), Box::new(handler));
        self
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn has_route(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Runs one request and produces its only reply.
    pub fn handle(&mut self, request: WorkerRequest<Req>) -> WorkerResponse<Res> {
        let WorkerRequest { id, name, request } = request;

        let Some(route) = self.routes.get_mut(&name) else {
            warn!("Worker {} got unknown command {:?}", self.worker, name);
            return WorkerResponse::Error {
                id,
                message: TaskError::UnknownCommand(name).to_string(),
                trace: None,
            };
        };

        match panic::catch_unwind(AssertUnwindSafe(|| route(request))) {
            Ok(Ok(response)) => WorkerResponse::Done { id, response },
            Ok(Err(err)) => WorkerResponse::Error {
                id,
                message: format!("{:#}", err),
                trace: Some(format!("{:?}", err)),
            },
            Err(payload) => WorkerResponse::Error {
                id,
                message: format!("Task {} panicked: {}", name, panic_message(payload.as_ref())),
                trace: None,
            },
        }
    }

    /// Serves `inbound` until told to terminate or the pool goes away.
    pub fn bind(mut self, inbound: Receiver<WorkerCommand<Req>>, outbound: Sender<Completion<Res>>) {
        while let Ok(command) = inbound.recv() {
            match command {
                WorkerCommand::Run(request) => {
                    let response = self.handle(request);
                    let completion = Completion {
                        worker: self.worker,
                        response,
                    };
                    if outbound.send(completion).is_err() {
                        break;
                    }
                }
                WorkerCommand::Terminate => break,
            }
        }
        debug!("Worker {} stopped", self.worker);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
