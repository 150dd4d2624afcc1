//! Virtual-time scheduler for deterministic tests of time-based sources.
//!
//! Scheduling only records a task. Nothing runs until the clock is moved with
//! [`TestScheduler::advance_by`] / [`TestScheduler::advance_to`] or the queue
//! is drained with [`TestScheduler::flush`]; due tasks then run synchronously
//! on the thread that moved the clock.
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let observer = TestObserver::new();
//! interval_on(Duration::from_secs(1), scheduler.clone()).subscribe_with(observer.clone());
//!
//! scheduler.advance_by(Duration::from_secs(3));
//! observer.assert_values(&[0, 1, 2]);
//! ```
//!
//! Clones share one clock and one queue, so a clone can be installed in the
//! scheduler registry while the test keeps driving the original.

use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::trace;

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::rc::{MutArc, RcDeref, RcDerefMut};

// ==================== Internal State ====================

struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

impl Default for TestSchedulerState {
  fn default() -> Self {
    Self { virtual_time: Duration::ZERO, task_queue: BinaryHeap::new(), next_task_id: 0 }
  }
}

impl TestSchedulerState {
  fn push(&mut self, scheduled_time: Duration, task: Task, handle: TaskHandle) {
    let task_id = self.next_task_id;
    self.next_task_id += 1;
    self
      .task_queue
      .push(ScheduledTask { scheduled_time, task_id, task, handle });
  }
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Task,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

// ==================== TestScheduler ====================

/// A scheduler driven by a virtual clock that starts at zero.
#[derive(Clone, Default)]
pub struct TestScheduler {
  state: MutArc<TestSchedulerState>,
}

impl TestScheduler {
  pub fn new() -> Self { Self::default() }

  /// Current virtual time.
  pub fn now(&self) -> Duration { self.state.rc_deref().virtual_time }

  /// Number of queued tasks, cancelled ones included until they are popped.
  pub fn pending_count(&self) -> usize { self.state.rc_deref().task_queue.len() }

  pub fn is_empty(&self) -> bool { self.state.rc_deref().task_queue.is_empty() }

  /// Move the clock forward by `duration`, running every task that becomes
  /// due on the way.
  ///
  /// Tasks run in due order with FIFO order between tasks due at the same
  /// instant. While a task runs, [`now`](Self::now) reports its due time.
  pub fn advance_by(&self, duration: Duration) {
    let target_time = self.now() + duration;
    self.advance_to(target_time);
  }

  /// Move the clock to `target_time`. A target in the past runs nothing and
  /// leaves the clock where it is.
  pub fn advance_to(&self, target_time: Duration) {
    if target_time < self.now() {
      trace!(?target_time, now = ?self.now(), "virtual clock not moved backwards");
      return;
    }
    trace!(?target_time, "advancing virtual clock");
    self.execute_tasks_until(Some(target_time));
    self.state.rc_deref_mut().virtual_time = target_time;
  }

  /// Run the tasks already due at the current time.
  pub fn trigger_actions(&self) { self.advance_to(self.now()); }

  /// Run queued tasks, moving the clock to each one's due time, until the
  /// queue is empty. Never returns while a periodic task is alive.
  pub fn flush(&self) { self.execute_tasks_until(None); }

  fn execute_tasks_until(&self, target_time: Option<Duration>) {
    loop {
      let next = {
        let mut state = self.state.rc_deref_mut();
        let due = state
          .task_queue
          .peek()
          .is_some_and(|peek| target_time.map_or(true, |limit| peek.scheduled_time <= limit));
        if !due {
          None
        } else {
          let scheduled_task = state.task_queue.pop();
          if let Some(task) = &scheduled_task {
            state.virtual_time = task.scheduled_time;
          }
          scheduled_task
        }
      };

      let Some(mut scheduled_task) = next else {
        break;
      };
      if scheduled_task.handle.is_cancelled() {
        continue;
      }

      // The lock is released here: tasks schedule more work on this scheduler.
      match scheduled_task.task.step() {
        TaskState::Finished => scheduled_task.handle.mark_finished(),
        TaskState::Yield => self.reschedule_task(scheduled_task, Duration::ZERO),
        TaskState::Sleeping(sleep) => self.reschedule_task(scheduled_task, sleep),
      }
    }
  }

  fn reschedule_task(&self, scheduled_task: ScheduledTask, delay: Duration) {
    let ScheduledTask { scheduled_time, task, handle, .. } = scheduled_task;
    self
      .state
      .rc_deref_mut()
      .push(scheduled_time + delay, task, handle);
  }
}

impl Scheduler for TestScheduler {
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    let mut state = self.state.rc_deref_mut();
    let scheduled_time = state.virtual_time + delay.unwrap_or(Duration::ZERO);
    trace!(?scheduled_time, "virtual task queued");
    state.push(scheduled_time, task, handle.clone());
    handle
  }
}
