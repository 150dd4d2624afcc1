use futures::executor::ThreadPool;
use tracing::{debug, trace};

use super::{run_async, Duration, Scheduler, Task, TaskHandle};
use crate::error::SchedulerError;

/// Settings for the worker pool behind a [`ThreadPoolScheduler`].
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
  /// Number of worker threads, `None` for one per CPU.
  pub pool_size: Option<usize>,
  pub name_prefix: String,
}

impl Default for ThreadPoolConfig {
  fn default() -> Self { ThreadPoolConfig { pool_size: None, name_prefix: "rxlite-worker-".into() } }
}

/// Runs tasks on a `futures` thread pool.
///
/// `schedule` returns before the task runs and there is no ordering between
/// separately scheduled tasks. Delays and sleeps wait on an async timer, so
/// a periodic task only occupies a worker while it is stepping.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

impl ThreadPoolScheduler {
  pub fn new() -> Result<Self, SchedulerError> { Self::with_config(ThreadPoolConfig::default()) }

  pub fn with_config(config: ThreadPoolConfig) -> Result<Self, SchedulerError> {
    let mut builder = ThreadPool::builder();
    builder.name_prefix(config.name_prefix.clone());
    if let Some(size) = config.pool_size {
      builder.pool_size(size);
    }
    let pool = builder.create()?;
    debug!(pool_size = ?config.pool_size, prefix = %config.name_prefix, "thread pool created");
    Ok(ThreadPoolScheduler { pool })
  }

  pub fn from_pool(pool: ThreadPool) -> Self { ThreadPoolScheduler { pool } }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule(&self, task: Task, delay: Option<Duration>) -> TaskHandle {
    trace!(?delay, "thread pool: task submitted");
    let handle = TaskHandle::new();
    self.pool.spawn_ok(run_async(task, delay, handle.clone()));
    handle
  }
}
