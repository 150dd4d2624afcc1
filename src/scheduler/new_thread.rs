use std::thread;

use tracing::{trace, warn};

use super::{run_blocking, Duration, Scheduler, Task, TaskHandle};

/// Spawns a dedicated OS thread for every scheduled task.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewThreadScheduler;

impl Scheduler for NewThreadScheduler {
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    let worker_handle = handle.clone();
    let (tx, rx) = std::sync::mpsc::channel::<Task>();
    let spawned = thread::Builder::new()
      .name("rxlite-new-thread".into())
      .spawn(move || {
        if let Ok(task) = rx.recv() {
          run_blocking(task, delay, &worker_handle);
        }
      });

    match spawned {
      Ok(_) => {
        trace!(?delay, "new thread: task handed to spawned thread");
        // The receiver only goes away if the thread died before receiving.
        if tx.send(task).is_err() {
          warn!("new thread exited before receiving its task");
        }
      }
      Err(err) => {
        warn!(%err, "failed to spawn thread, running task on the caller");
        run_blocking(task, delay, &handle);
      }
    }
    handle
  }
}
