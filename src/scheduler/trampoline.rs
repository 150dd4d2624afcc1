//! Per-thread trampoline.
//!
//! The first `schedule` call on a thread becomes the *drainer*: it runs every
//! queued task, including tasks scheduled by the tasks it runs, until the
//! queue is empty. Nested calls only enqueue, so recursive scheduling turns
//! into iteration instead of stack growth.

use std::{cell::RefCell, cmp::Ordering, collections::BinaryHeap};

use tracing::trace;

use super::{Duration, Instant, Scheduler, Task, TaskHandle, TaskState};

#[derive(Debug, Clone, Copy, Default)]
pub struct TrampolineScheduler;

#[derive(Default)]
struct TrampolineQueue {
  draining: bool,
  next_id: usize,
  tasks: BinaryHeap<QueuedTask>,
}

struct QueuedTask {
  due: Instant,
  id: usize,
  task: Task,
  handle: TaskHandle,
}

impl PartialEq for QueuedTask {
  fn eq(&self, other: &Self) -> bool { self.due == other.due && self.id == other.id }
}

impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for QueuedTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earliest due first, then schedule order.
    other
      .due
      .cmp(&self.due)
      .then_with(|| other.id.cmp(&self.id))
  }
}

thread_local! {
  static QUEUE: RefCell<TrampolineQueue> = RefCell::new(TrampolineQueue::default());
}

impl TrampolineQueue {
  fn push(&mut self, due: Instant, task: Task, handle: TaskHandle) {
    let id = self.next_id;
    self.next_id += 1;
    self.tasks.push(QueuedTask { due, id, task, handle });
  }
}

impl Scheduler for TrampolineScheduler {
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    let handle = TaskHandle::new();
    let due = Instant::now() + delay.unwrap_or_default();
    let should_drain = QUEUE.with(|queue| {
      let mut queue = queue.borrow_mut();
      queue.push(due, task, handle.clone());
      !std::mem::replace(&mut queue.draining, true)
    });

    if should_drain {
      drain();
    } else {
      trace!("trampoline: task enqueued behind the running drainer");
    }
    handle
  }
}

/// Clears the draining flag when the drainer leaves, even by unwinding. On a
/// panic the remaining tasks are discarded so the next drainer starts clean.
struct DrainGuard;

impl Drop for DrainGuard {
  fn drop(&mut self) {
    QUEUE.with(|queue| {
      let mut queue = queue.borrow_mut();
      queue.draining = false;
      if std::thread::panicking() {
        queue.tasks.clear();
      }
    });
  }
}

fn drain() {
  let _guard = DrainGuard;
  loop {
    let next = QUEUE.with(|queue| queue.borrow_mut().tasks.pop());
    let Some(mut queued) = next else {
      break;
    };
    if queued.handle.is_cancelled() {
      continue;
    }

    let now = Instant::now();
    if queued.due > now {
      std::thread::sleep(queued.due - now);
    }

    match queued.task.step() {
      TaskState::Finished => queued.handle.mark_finished(),
      TaskState::Yield => {
        QUEUE.with(|queue| queue.borrow_mut().push(Instant::now(), queued.task, queued.handle));
      }
      TaskState::Sleeping(duration) => {
        let due = Instant::now() + duration;
        QUEUE.with(|queue| queue.borrow_mut().push(due, queued.task, queued.handle));
      }
    }
  }
}
