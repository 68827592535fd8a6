use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::trace;

/// Runs a task on its own thread after a delay, unless cancelled first.
///
/// Dropping the handle cancels the task. Cancelling never waits for the
/// thread, so it is safe while holding a lock that the task needs; the task
/// has to check by itself whether it is still wanted once it has that lock.
#[derive(Debug)]
pub struct ScheduledTask {
    cancel: Option<Sender<()>>,
}

impl ScheduledTask {
    pub fn schedule<F>(name: &str, delay: Duration, task: F) -> std::io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let task_name = name.to_string();
        thread::Builder::new()
            .name(task_name.clone())
            .spawn(move || match cancelled.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {
                    trace!(task = %task_name, "Running scheduled task");
                    task();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    trace!(task = %task_name, "Scheduled task cancelled");
                }
            })?;
        Ok(Self {
            cancel: Some(cancel),
        })
    }

    pub fn cancel(mut self) {
        self.send_cancel();
    }

    fn send_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The thread may be gone already, which is fine
            let _ = cancel.send(());
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.send_cancel();
    }
}
