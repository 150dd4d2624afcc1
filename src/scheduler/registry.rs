//! Process-wide scheduler roles.
//!
//! Operators that need "some computation scheduler" ask [`Schedulers`] for a
//! role instead of building one. Tests swap every role for a
//! [`TestScheduler`](super::TestScheduler) or the trampoline with a
//! [`SchedulerOverride`] and get defaults back when the guard drops.
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! {
//!   let _guard = SchedulerOverride::acquire().all(scheduler.clone());
//!   // `interval` now ticks on virtual time.
//!   let _ = interval(Duration::from_secs(1));
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::{debug, warn};

use super::{
  ImmediateScheduler, NewThreadScheduler, SchedulerRef, ThreadPoolConfig, ThreadPoolScheduler,
  TrampolineScheduler,
};

/// A replaceable scheduler slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerRole {
  /// CPU-bound work and timers.
  Computation,
  /// Blocking I/O.
  Io,
  /// One thread per task.
  NewThread,
}

impl SchedulerRole {
  pub const ALL: [SchedulerRole; 3] =
    [SchedulerRole::Computation, SchedulerRole::Io, SchedulerRole::NewThread];
}

/// Maps a role's default scheduler to the scheduler actually handed out.
pub type SchedulerHandler = Arc<dyn Fn(SchedulerRef) -> SchedulerRef + Send + Sync>;

struct Defaults {
  computation: SchedulerRef,
  io: SchedulerRef,
  new_thread: SchedulerRef,
}

static DEFAULTS: Lazy<Defaults> = Lazy::new(|| Defaults {
  computation: pool_or_new_thread("rxlite-computation-"),
  io: pool_or_new_thread("rxlite-io-"),
  new_thread: Arc::new(NewThreadScheduler),
});

static HANDLERS: Lazy<RwLock<HashMap<SchedulerRole, SchedulerHandler>>> =
  Lazy::new(|| RwLock::new(HashMap::new()));

static OVERRIDE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn pool_or_new_thread(name_prefix: &str) -> SchedulerRef {
  let config = ThreadPoolConfig { name_prefix: name_prefix.into(), ..Default::default() };
  match ThreadPoolScheduler::with_config(config) {
    Ok(pool) => Arc::new(pool),
    Err(err) => {
      warn!(%err, name_prefix, "falling back to a thread per task");
      Arc::new(NewThreadScheduler)
    }
  }
}

/// The scheduler a role resolves to when no handler is installed.
pub fn default_scheduler(role: SchedulerRole) -> SchedulerRef {
  match role {
    SchedulerRole::Computation => DEFAULTS.computation.clone(),
    SchedulerRole::Io => DEFAULTS.io.clone(),
    SchedulerRole::NewThread => DEFAULTS.new_thread.clone(),
  }
}

/// Resolve `role` through its handler, if any.
pub fn resolve(role: SchedulerRole) -> SchedulerRef {
  let default = default_scheduler(role);
  // Clone the handler out so it runs without the table locked.
  let handler = HANDLERS.read().get(&role).cloned();
  match handler {
    Some(handler) => handler(default),
    None => default,
  }
}

/// Install `handler` for `role`, replacing any previous one.
pub fn set_handler<F>(role: SchedulerRole, handler: F)
where
  F: Fn(SchedulerRef) -> SchedulerRef + Send + Sync + 'static,
{
  debug!(?role, "scheduler handler installed");
  HANDLERS.write().insert(role, Arc::new(handler));
}

/// Remove every installed handler.
pub fn reset() {
  debug!("scheduler handlers reset");
  HANDLERS.write().clear();
}

/// Entry points used by operators to look up schedulers.
pub struct Schedulers;

impl Schedulers {
  pub fn computation() -> SchedulerRef { resolve(SchedulerRole::Computation) }

  pub fn io() -> SchedulerRef { resolve(SchedulerRole::Io) }

  pub fn new_thread() -> SchedulerRef { resolve(SchedulerRole::NewThread) }

  /// Not a role: the trampoline cannot be overridden.
  pub fn trampoline() -> SchedulerRef { Arc::new(TrampolineScheduler) }

  /// Not a role: the immediate scheduler cannot be overridden.
  pub fn immediate() -> SchedulerRef { Arc::new(ImmediateScheduler) }
}

/// Scoped registry override.
///
/// Acquiring the guard serializes against every other override in the
/// process and starts from a clean registry. Dropping it, also while a
/// panic unwinds, resets all handlers before the lock is released.
#[must_use = "the override is removed as soon as the guard is dropped"]
pub struct SchedulerOverride {
  _exclusive: MutexGuard<'static, ()>,
}

impl SchedulerOverride {
  /// Blocks until no other override is alive, then clears every handler.
  ///
  /// The lock is not reentrant: acquiring a second override on a thread that
  /// still holds one deadlocks. Drop the first guard before taking another.
  pub fn acquire() -> Self {
    let exclusive = OVERRIDE_LOCK.lock();
    reset();
    SchedulerOverride { _exclusive: exclusive }
  }

  pub fn with_handler<F>(self, role: SchedulerRole, handler: F) -> Self
  where
    F: Fn(SchedulerRef) -> SchedulerRef + Send + Sync + 'static,
  {
    set_handler(role, handler);
    self
  }

  /// Route every role to `scheduler`.
  pub fn all<S>(self, scheduler: S) -> Self
  where
    S: super::Scheduler + 'static,
  {
    let shared: SchedulerRef = Arc::new(scheduler);
    SchedulerRole::ALL.into_iter().fold(self, |guard, role| {
      let shared = shared.clone();
      guard.with_handler(role, move |_| shared.clone())
    })
  }
}

impl Drop for SchedulerOverride {
  fn drop(&mut self) { reset(); }
}
