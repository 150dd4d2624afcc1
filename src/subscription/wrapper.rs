use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use super::Subscription;

/// The subscription returned by `Observable::subscribe` and
/// `Observable::subscribe_with`.
///
/// It shares a closed flag with the `Subscriber` wrapping the consumer, so
/// unsubscribing silences the observer even if the upstream is still busy.
pub struct SubscriptionWrapper<U> {
  upstream: U,
  closed: Arc<AtomicBool>,
}

impl<U: Subscription> SubscriptionWrapper<U> {
  pub(crate) fn new(upstream: U, closed: Arc<AtomicBool>) -> Self {
    SubscriptionWrapper { upstream, closed }
  }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard::new(self) }
}

impl<U: Subscription> Subscription for SubscriptionWrapper<U> {
  fn unsubscribe(self) {
    self.closed.store(true, Ordering::Release);
    self.upstream.unsubscribe();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scheduler::TaskHandle;

  #[test]
  fn guard_unsubscribes_on_drop() {
    let handle = TaskHandle::new();
    let closed = Arc::new(AtomicBool::new(false));
    {
      let _guard =
        SubscriptionWrapper::new(handle.clone(), closed.clone()).unsubscribe_when_dropped();
      assert!(!handle.is_closed());
    }
    assert!(handle.is_closed());
    assert!(closed.load(Ordering::Acquire));
  }
}
