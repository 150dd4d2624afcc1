use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use crate::observer::Observer;

/// Wraps the consumer at the end of a chain.
///
/// A `Subscriber` enforces the observer contract for whatever it wraps: once
/// the paired `SubscriptionWrapper` is cancelled, or a terminal event has been
/// delivered, nothing else reaches the inner observer.
pub struct Subscriber<O> {
  observer: O,
  closed: Arc<AtomicBool>,
}

impl<O> Subscriber<O> {
  /// Wrap `observer`, returning the subscriber and the flag shared with the
  /// subscription handle.
  pub fn new(observer: O) -> (Self, Arc<AtomicBool>) {
    let closed = Arc::new(AtomicBool::new(false));
    (Subscriber { observer, closed: closed.clone() }, closed)
  }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if !self.closed.load(Ordering::Acquire) {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.observer.error(err);
    }
  }

  fn complete(self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) || self.observer.is_closed() }
}
