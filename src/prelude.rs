//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::{BlockingError, RxError, SchedulerError, WaitTimeout};
// Core traits and sources
pub use crate::observable::{
  empty, from_iter, interval, interval_on, never, range, throw_err, CoreObservable, Empty,
  IntervalObservable, Never, Observable, ObservableIter, ObservableType, ThrowErr,
};
// Observer trait
pub use crate::observer::{FnMutObserver, Observer};
// Operators
pub use crate::ops::{
  blocking::BlockingIter, concat::Concat, subscribe_on::SubscribeOn, zip::Zip,
};
// Schedulers
pub use crate::scheduler::{
  registry::{reset as reset_schedulers, set_handler as set_scheduler_handler},
  Duration, ImmediateScheduler, Instant, NewThreadScheduler, Scheduler, SchedulerOverride,
  SchedulerRef, SchedulerRole, Schedulers, Task, TaskHandle, TaskState, TestScheduler,
  ThreadPoolConfig, ThreadPoolScheduler, TrampolineScheduler,
};
// Subscription
pub use crate::subscription::*;
// Test harness
pub use crate::testing::{wait_until, TestObserver};
