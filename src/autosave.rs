//! Background autosave on tokio.
//!
//! [`Autosave::spawn`] moves a [`PersistController`] into a task that owns
//! it outright. The task waits on its command channel and on the pending
//! save's deadline; saves run to completion inside the task, so a started
//! write is never cancelled. When every handle is gone the task flushes the
//! pending snapshot and exits.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::error::{CanonError, CanonResult};
use crate::node::Document;
use crate::persist::{PersistController, SaveOutcome};
use crate::phase::Live;
use crate::store::SnapshotStore;

enum Command {
    Change(Document<Live>),
    Flush(oneshot::Sender<Option<SaveOutcome>>),
    Clear(oneshot::Sender<CanonResult<()>>),
    Shutdown,
}

/// Spawner for the autosave task.
pub struct Autosave;

impl Autosave {
    /// Spawn the task on the current tokio runtime.
    pub fn spawn<S>(controller: PersistController<S, Instant>) -> AutosaveHandle
    where
        S: SnapshotStore + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(controller, rx));
        AutosaveHandle { tx, task: Some(task) }
    }
}

async fn run<S: SnapshotStore>(mut controller: PersistController<S, Instant>, mut rx: mpsc::UnboundedReceiver<Command>) {
    tracing::debug!(key = controller.config().key(), "autosave started");

    loop {
        let deadline = controller.deadline();
        let due = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Change(doc)) => controller.on_change_at(doc, Instant::now()),
                Some(Command::Flush(reply)) => {
                    let _ = reply.send(controller.flush());
                }
                Some(Command::Clear(reply)) => {
                    let _ = reply.send(controller.clear());
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = due => {
                controller.poll_at(Instant::now());
            }
        }
    }

    if let Some(outcome) = controller.flush() {
        tracing::debug!(written = outcome.is_written(), "autosave flushed on shutdown");
    }
    tracing::debug!(key = controller.config().key(), "autosave stopped");
}

/// Handle to a running autosave task.
///
/// Dropping it lets the task flush its pending save and exit.
#[derive(Debug)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl AutosaveHandle {
    /// Record an editor change. Returns `false` if the task has stopped.
    pub fn change(&self, snapshot: Document<Live>) -> bool {
        self.tx.send(Command::Change(snapshot)).is_ok()
    }

    /// Save the pending snapshot now.
    pub async fn flush(&self) -> CanonResult<Option<SaveOutcome>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .map_err(|_| CanonError::Stopped)?;
        rx.await.map_err(|_| CanonError::Stopped)
    }

    /// Remove the stored state and drop the pending save.
    pub async fn clear(&self) -> CanonResult<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Clear(reply))
            .map_err(|_| CanonError::Stopped)?;
        rx.await.map_err(|_| CanonError::Stopped)?
    }

    /// Stop the task after it flushes, and wait for it.
    pub async fn shutdown(mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::error!(error = %err, "autosave task failed");
            }
        }
    }

    /// Whether the task is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Command::Change(_) => "Change",
            Command::Flush(_) => "Flush",
            Command::Clear(_) => "Clear",
            Command::Shutdown => "Shutdown",
        })
    }
}
