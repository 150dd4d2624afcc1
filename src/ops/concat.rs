use crate::{
  observable::{CoreObservable, ErrOf, ItemOf, ObservableType},
  observer::Observer,
  subscription::{Subscription, SubscriptionProxy, TupleSubscription},
};

/// Emits everything from `first`, then subscribes `second` when `first`
/// completes. An error from `first` is forwarded and `second` is never
/// subscribed.
#[derive(Clone)]
pub struct Concat<A, B> {
  pub first: A,
  pub second: B,
}

impl<A, B> Concat<A, B> {
  pub fn new(first: A, second: B) -> Self { Concat { first, second } }
}

impl<A, B> ObservableType for Concat<A, B>
where
  A: ObservableType,
  B: ObservableType<Item = A::Item, Err = A::Err>,
{
  type Item = A::Item;
  type Err = A::Err;
}

impl<A, B, O> CoreObservable<O> for Concat<A, B>
where
  A: ObservableType + CoreObservable<ConcatObserver<O, B>>,
  B: ObservableType<Item = ItemOf<A>, Err = ErrOf<A>> + CoreObservable<O>,
  O: Observer<ItemOf<A>, ErrOf<A>>,
  <A as CoreObservable<ConcatObserver<O, B>>>::Unsub: Send + 'static,
  <B as CoreObservable<O>>::Unsub: Send + 'static,
{
  type Unsub = TupleSubscription<SubscriptionProxy, SubscriptionProxy>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Concat { first, second } = self;
    let first_proxy = SubscriptionProxy::new();
    let second_proxy = SubscriptionProxy::new();

    let concat_observer = ConcatObserver { observer, second, proxy: second_proxy.clone() };
    first_proxy.set(first.actual_subscribe(concat_observer));

    TupleSubscription::new(first_proxy, second_proxy)
  }
}

/// Forwards the first source and hands the downstream to the second one on
/// completion.
pub struct ConcatObserver<O, B> {
  observer: O,
  second: B,
  proxy: SubscriptionProxy,
}

impl<Item, Err, O, B> Observer<Item, Err> for ConcatObserver<O, B>
where
  O: Observer<Item, Err>,
  B: CoreObservable<O>,
  B::Unsub: Send + 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    let ConcatObserver { observer, second, proxy } = self;
    if !proxy.is_closed() {
      proxy.set(second.actual_subscribe(observer));
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() || self.proxy.is_closed() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn second_follows_first() {
    let observer = TestObserver::new();
    from_iter(vec![1, 2])
      .concat(from_iter(vec![3]))
      .subscribe_with(observer.clone());
    observer.assert_values(&[1, 2, 3]).assert_complete();
  }

  #[test]
  fn error_skips_second() {
    let err = RxError::msg("first failed");
    let observer = TestObserver::new();
    throw_err(err.clone())
      .concat(from_iter(vec![1]))
      .subscribe_with(observer.clone());
    observer.assert_no_values().assert_error(&err);
  }

  #[test]
  fn concat_with_error_appends_the_error() {
    let err = RxError::msg("boom!");
    let observer = TestObserver::new();
    from_iter(vec!["a", "b"])
      .concat_with_error(err.clone())
      .subscribe_with(observer.clone());

    observer
      .assert_values(&["a", "b"])
      .assert_error(&err)
      .assert_not_complete();
  }

  #[test]
  fn second_waits_for_asynchronous_first() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    let ticks = interval_on(Duration::from_secs(1), scheduler.clone())
      .zip(range(0, 2), |tick, _| tick);
    ticks.concat(from_iter(vec![100])).subscribe_with(observer.clone());

    observer.assert_no_values();
    scheduler.advance_by(Duration::from_secs(2));
    observer.assert_values(&[0, 1, 100]).assert_complete();
  }

  #[test]
  fn unsubscribed_before_second_starts() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    let subscription = interval_on(Duration::from_secs(1), scheduler.clone())
      .zip(range(0, 1), |tick, _| tick)
      .concat(from_iter(vec![100]))
      .subscribe_with(observer.clone());

    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_secs(5));
    observer.assert_no_values().assert_not_complete();
  }
}
