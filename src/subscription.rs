//! Subscription trait and combinators
//!
//! A `Subscription` is the handle returned from subscribing. It lets the
//! consumer stop receiving events before the stream terminates on its own.

mod boxed;
mod proxy;
mod tuple;
mod wrapper;

pub use boxed::*;
pub use proxy::*;
pub use tuple::*;
pub use wrapper::*;

/// Handle that can cancel an active subscription.
///
/// Cancellation is cooperative: producers observe it through
/// `Observer::is_closed` or a cancelled `TaskHandle` and stop at their next
/// step. Work already running when `unsubscribe` is called may still finish.
pub trait Subscription {
  /// Stop delivering events to the associated observer.
  fn unsubscribe(self);

  /// Returns true once the subscription can no longer deliver events,
  /// either because it was cancelled or because the stream terminated.
  fn is_closed(&self) -> bool;
}

/// Subscriptions of sources that finish synchronously inside `subscribe`.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}
