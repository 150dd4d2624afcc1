use super::{BoxedSubscription, Subscription};
use crate::rc::{MutArc, RcDeref, RcDerefMut};

/// A clonable slot for a subscription that does not exist yet.
///
/// Operators hand a proxy out before the real upstream subscription is
/// created (e.g. `zip` subscribes its second input after the first, and
/// `subscribe_on` subscribes later on another scheduler). If the proxy is
/// cancelled before `set` is called, the subscription passed to `set` is
/// cancelled immediately.
#[derive(Clone, Default)]
pub struct SubscriptionProxy(MutArc<ProxyState>);

#[derive(Default)]
struct ProxyState {
  closed: bool,
  target: Option<BoxedSubscription>,
}

impl SubscriptionProxy {
  pub fn new() -> Self { Self::default() }

  /// Attach the real subscription.
  pub fn set(&self, subscription: impl Subscription + Send + 'static) {
    let mut state = self.0.rc_deref_mut();
    if state.closed {
      drop(state);
      subscription.unsubscribe();
    } else {
      state.target = Some(BoxedSubscription::new(subscription));
    }
  }
}

impl Subscription for SubscriptionProxy {
  fn unsubscribe(self) {
    let target = {
      let mut state = self.0.rc_deref_mut();
      state.closed = true;
      state.target.take()
    };
    if let Some(target) = target {
      target.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
