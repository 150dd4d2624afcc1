//! Schedulers decide *where* and *when* work runs.
//!
//! Work is expressed as a [`Task`]: a resumable unit that reports after each
//! step whether it is finished, wants to run again right away, or wants to
//! sleep. Periodic sources such as `interval` are simply tasks that keep
//! sleeping, so every scheduler, real or virtual, drives them the same way.
//!
//! | Scheduler | Policy |
//! |-----------|--------|
//! | [`ImmediateScheduler`] | runs inline on the caller before `schedule` returns |
//! | [`TrampolineScheduler`] | per-thread queue drained synchronously by the outermost caller |
//! | [`ThreadPoolScheduler`] | runs tasks as futures on a `futures` worker pool |
//! | [`NewThreadScheduler`] | one OS thread per scheduled task |
//! | [`TestScheduler`] | virtual clock, runs only when advanced |

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

pub use std::time::{Duration, Instant};

use crate::subscription::Subscription;

mod immediate;
mod new_thread;
pub mod registry;
pub mod test_scheduler;
mod thread_pool_scheduler;
mod trampoline;

pub use immediate::ImmediateScheduler;
pub use new_thread::NewThreadScheduler;
pub use registry::{SchedulerOverride, SchedulerRole, Schedulers};
pub use test_scheduler::TestScheduler;
pub use thread_pool_scheduler::{ThreadPoolConfig, ThreadPoolScheduler};
pub use trampoline::TrampolineScheduler;

// ==================== Task ====================

/// What a task wants after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
  /// The task is done and must not run again.
  Finished,
  /// Run the task again as soon as possible.
  Yield,
  /// Run the task again after the given duration on the scheduler's clock.
  Sleeping(Duration),
}

/// A unit of work owned by a scheduler.
///
/// The state is moved into the task and handed to `handler` by mutable
/// reference on every step.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let mut task = Task::new(0, |count| {
///   *count += 1;
///   if *count < 3 { TaskState::Yield } else { TaskState::Finished }
/// });
/// assert_eq!(task.step(), TaskState::Yield);
/// ```
pub struct Task {
  step: Box<dyn FnMut() -> TaskState + Send>,
}

impl Task {
  pub fn new<S>(mut state: S, handler: fn(&mut S) -> TaskState) -> Self
  where
    S: Send + 'static,
  {
    Task { step: Box::new(move || handler(&mut state)) }
  }

  /// Run one step of the task.
  #[inline]
  pub fn step(&mut self) -> TaskState { (self.step)() }
}

// ==================== TaskHandle ====================

/// Handle to a scheduled task. Unsubscribing it makes the scheduler skip the
/// task at its next step.
#[derive(Clone, Default)]
pub struct TaskHandle(Arc<TaskHandleInner>);

#[derive(Default)]
struct TaskHandleInner {
  cancelled: AtomicBool,
  finished: AtomicBool,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle for work that already ran to completion.
  pub fn finished() -> Self {
    let handle = Self::new();
    handle.mark_finished();
    handle
  }

  pub fn mark_finished(&self) { self.0.finished.store(true, Ordering::Release); }

  pub fn is_finished(&self) -> bool { self.0.finished.load(Ordering::Acquire) }

  pub fn is_cancelled(&self) -> bool { self.0.cancelled.load(Ordering::Acquire) }
}

impl Subscription for TaskHandle {
  fn unsubscribe(self) { self.0.cancelled.store(true, Ordering::Release); }

  fn is_closed(&self) -> bool { self.is_cancelled() || self.is_finished() }
}

// ==================== Scheduler ====================

/// A capability to execute tasks, immediately or after a delay, on some
/// execution context.
pub trait Scheduler: Send + Sync {
  /// Schedule `task` to run after `delay` (or as soon as the policy allows
  /// when `None`).
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle;
}

/// A type-erased, shareable scheduler as handed out by the role registry.
pub type SchedulerRef = Arc<dyn Scheduler>;

impl<T: Scheduler + ?Sized> Scheduler for Arc<T> {
  #[inline]
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    (**self).schedule(task, delay)
  }
}

/// Drive `task` to completion on the current thread against the wall clock,
/// blocking the thread through delays and sleeps.
pub(crate) fn run_blocking(mut task: Task, delay: Option<Duration>, handle: &TaskHandle) {
  if let Some(delay) = delay {
    std::thread::sleep(delay);
  }
  loop {
    if handle.is_cancelled() {
      return;
    }
    match task.step() {
      TaskState::Finished => {
        handle.mark_finished();
        return;
      }
      TaskState::Yield => {}
      TaskState::Sleeping(duration) => std::thread::sleep(duration),
    }
  }
}

/// Drive `task` as a future, sleeping on an async timer so the executor
/// thread stays free for other tasks while this one waits.
pub(crate) async fn run_async(mut task: Task, delay: Option<Duration>, handle: TaskHandle) {
  if let Some(delay) = delay {
    futures_time::task::sleep(delay.into()).await;
  }
  loop {
    if handle.is_cancelled() {
      return;
    }
    match task.step() {
      TaskState::Finished => {
        handle.mark_finished();
        return;
      }
      TaskState::Yield => futures_time::task::sleep(Duration::ZERO.into()).await,
      TaskState::Sleeping(duration) => futures_time::task::sleep(duration.into()).await,
    };
  }
}
