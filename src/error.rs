//! Error types
//!
//! `RxError` is the value carried by the `error` channel of every stream
//! built from this crate's factories. The remaining types report failures of
//! the crate's own machinery (schedulers, blocking consumption, waiting).

use std::{
  error::Error,
  fmt::{Debug, Display, Formatter},
  sync::Arc,
  time::Duration,
};

/// A type-erased, cheaply clonable stream error.
///
/// Equality is identity: two `RxError`s compare equal only when one is a
/// clone of the other. This lets a test inject an error instance and later
/// assert that exactly that instance reached the observer.
///
/// ```rust
/// use rxlite::error::RxError;
///
/// let boom = RxError::msg("boom!");
/// assert_eq!(boom, boom.clone());
/// assert_ne!(boom, RxError::msg("boom!"));
/// ```
#[derive(Clone)]
pub struct RxError(Arc<dyn Error + Send + Sync + 'static>);

impl RxError {
  pub fn new<E>(err: E) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    RxError(Arc::new(err))
  }

  /// Create an error from a plain message.
  pub fn msg(message: impl Into<String>) -> Self { RxError::new(Message(message.into())) }

  /// Returns true if both values share the same underlying error instance.
  #[inline]
  pub fn ptr_eq(&self, other: &RxError) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> { self.0.downcast_ref::<E>() }
}

impl PartialEq for RxError {
  fn eq(&self, other: &Self) -> bool { self.ptr_eq(other) }
}

impl Eq for RxError {}

impl Display for RxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Display::fmt(&self.0, f) }
}

impl Debug for RxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("RxError").field(&self.0.to_string()).finish()
  }
}

impl Error for RxError {
  fn source(&self) -> Option<&(dyn Error + 'static)> { self.0.source() }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

/// Errors raised while building schedulers.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
  /// The worker pool backing a `ThreadPoolScheduler` could not be started.
  #[error("failed to create thread pool: {0}")]
  PoolCreation(#[from] std::io::Error),
}

/// Errors yielded by a blocking iterator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockingError<E> {
  /// The upstream terminated with an error.
  #[error("upstream error: {0}")]
  Upstream(E),

  /// No event arrived within the configured timeout.
  #[error("no event within {0:?}")]
  Timeout(Duration),

  /// The stream let go of its observer without completing or failing, so no
  /// further event can arrive.
  #[error("stream dropped its observer without terminating")]
  Disconnected,
}

/// A polling wait gave up before its condition held.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("condition not met within {timeout:?}")]
pub struct WaitTimeout {
  pub timeout: Duration,
}
