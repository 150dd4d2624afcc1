//! # rxlite: a small Reactive Extensions core
//!
//! Push-based streams with positional `zip`, pluggable schedulers and a
//! virtual clock for deterministic tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let observer = TestObserver::new();
//! from_iter("the quick brown fox".split(' '))
//!   .zip(range(1, usize::MAX), |word, i| format!("{i:2}. {word}"))
//!   .subscribe_with(observer.clone());
//!
//! observer.assert_value_count(4).assert_complete();
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Composition and consumption methods on every stream |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Decides where and when a [`Task`] runs |
//! | [`Schedulers`] | Process-wide scheduler roles, overridable in tests |
//! | [`TestObserver`] | Records events and asserts on them |
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler
//! [`Task`]: scheduler::Task
//! [`Schedulers`]: scheduler::Schedulers
//! [`TestObserver`]: testing::TestObserver

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscriber;
pub mod subscription;
pub mod testing;

pub use crate::scheduler::{Duration, Instant};

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
