use tracing::trace;

use super::{run_blocking, Duration, Scheduler, Task, TaskHandle};

/// Runs every task synchronously on the calling thread before `schedule`
/// returns. Delays and sleeps block the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    trace!(?delay, "immediate: running task inline");
    let handle = TaskHandle::new();
    run_blocking(task, delay, &handle);
    handle
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;
  use crate::scheduler::TaskState;

  #[test]
  fn runs_before_returning() {
    let hits = Arc::new(AtomicUsize::new(0));
    let handle = ImmediateScheduler.schedule(
      Task::new(hits.clone(), |hits| {
        hits.fetch_add(1, Ordering::SeqCst);
        TaskState::Finished
      }),
      None,
    );

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(handle.is_finished());
  }

  #[test]
  fn sleeping_task_blocks_caller() {
    let start = std::time::Instant::now();
    ImmediateScheduler.schedule(
      Task::new(0, |ticks| {
        *ticks += 1;
        if *ticks < 3 {
          TaskState::Sleeping(Duration::from_millis(5))
        } else {
          TaskState::Finished
        }
      }),
      Some(Duration::from_millis(5)),
    );
    assert!(start.elapsed() >= Duration::from_millis(15));
  }
}
