//! # Dispatch queue
//!
//! A single worker thread owns the [`PingStorage`] and applies recording
//! tasks strictly in enqueue order. Recording callers never block and never
//! observe a result; test accessors and collection go through [`execute`] so
//! they are serialized behind every previously enqueued recording.
//!
//! [`execute`]: Dispatcher::execute

use std::sync::mpsc;
use std::thread;

use tracing::error;

use crate::storage::PingStorage;
use crate::Error;

type Task = Box<dyn FnOnce(&mut PingStorage) + Send + 'static>;

enum Command {
    Task(Task),
    Drain(mpsc::SyncSender<()>),
}

pub(crate) struct Dispatcher {
    sender: mpsc::Sender<Command>,
}

impl Dispatcher {
    /// Spawn the worker thread. There is no shutdown; the worker runs until
    /// the process exits (crash-only failure model).
    pub(crate) fn launch() -> Result<Dispatcher, Error> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("ping-telemetry-dispatcher".into())
            .spawn(move || Self::worker(receiver))?;
        Ok(Dispatcher { sender })
    }

    fn worker(receiver: mpsc::Receiver<Command>) {
        let mut storage = PingStorage::new();
        while let Ok(command) = receiver.recv() {
            match command {
                Command::Task(task) => task(&mut storage),
                Command::Drain(done) => {
                    // The waiter may have given up; that is fine
                    let _ = done.send(());
                }
            }
        }
    }

    /// Fire-and-forget: enqueue a task and return immediately
    pub(crate) fn dispatch(&self, task: impl FnOnce(&mut PingStorage) + Send + 'static) {
        if self.sender.send(Command::Task(Box::new(task))).is_err() {
            error!("dispatcher worker is gone, dropping recording");
        }
    }

    /// Block until every task enqueued before this call has been applied
    pub(crate) fn block_on_queue(&self) {
        let (done, wait) = mpsc::sync_channel(1);
        if self.sender.send(Command::Drain(done)).is_err() {
            error!("dispatcher worker is gone, nothing to drain");
            return;
        }
        let _ = wait.recv();
    }

    /// Enqueue a task and wait for its result. Returns `None` only if the
    /// worker is gone.
    pub(crate) fn execute<T, F>(&self, task: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PingStorage) -> T + Send + 'static,
    {
        let (result, wait) = mpsc::sync_channel(1);
        self.dispatch(move |storage| {
            let _ = result.send(task(storage));
        });
        wait.recv().ok()
    }
}
