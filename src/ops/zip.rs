//! Zip operator implementation
//!
//! Zip combines items from two observables by position: the i-th item of one
//! side is paired with the i-th item of the other and the pair goes through a
//! combiner. Whichever side runs ahead is buffered.

use std::collections::VecDeque;

use crate::{
  observable::{CoreObservable, ErrOf, ItemOf, ObservableType},
  observer::Observer,
  rc::{MutArc, RcDeref, RcDerefMut},
  subscription::{Subscription, SubscriptionProxy, TupleSubscription},
};

// ==================== Zip Operator ====================

/// Zip operator
///
/// Emits `combiner(a_i, b_i)` for every position both sources reach, so the
/// output length is the shorter input's length. Completes as soon as a
/// completed source has no buffered items left, cancelling the other source.
/// An error from either source is forwarded at once and cancels both.
#[derive(Clone)]
pub struct Zip<A, B, F> {
  pub source_a: A,
  pub source_b: B,
  pub combiner: F,
}

impl<A, B, F> Zip<A, B, F> {
  pub fn new(source_a: A, source_b: B, combiner: F) -> Self { Zip { source_a, source_b, combiner } }
}

impl<A, B, F, Out> ObservableType for Zip<A, B, F>
where
  A: ObservableType,
  B: ObservableType<Err = A::Err>,
  F: FnMut(A::Item, B::Item) -> Out,
{
  type Item = Out;
  type Err = A::Err;
}

// ==================== Shared State ====================

/// Pairing state shared by both sides of one subscription.
pub struct ZipState<O, ItemA, ItemB, F> {
  observer: Option<O>,
  combiner: F,
  buffer_a: VecDeque<ItemA>,
  buffer_b: VecDeque<ItemB>,
  completed_a: bool,
  completed_b: bool,
}

impl<O, ItemA, ItemB, F> ZipState<O, ItemA, ItemB, F> {
  fn new(observer: O, combiner: F) -> Self {
    Self {
      observer: Some(observer),
      combiner,
      buffer_a: VecDeque::new(),
      buffer_b: VecDeque::new(),
      completed_a: false,
      completed_b: false,
    }
  }

  fn emit<Out, Err>(&mut self, a: ItemA, b: ItemB)
  where
    O: Observer<Out, Err>,
    F: FnMut(ItemA, ItemB) -> Out,
  {
    let value = (self.combiner)(a, b);
    if let Some(observer) = self.observer.as_mut() {
      observer.next(value);
    }
  }

  /// No more pairs can be formed once a completed side has nothing buffered.
  fn exhausted(&self) -> bool {
    self.completed_a && self.buffer_a.is_empty() || self.completed_b && self.buffer_b.is_empty()
  }

  /// Takes the downstream out when the zip is done. The caller completes it
  /// after releasing the lock.
  fn take_if_exhausted(&mut self) -> Option<O> {
    if self.exhausted() {
      self.observer.take()
    } else {
      None
    }
  }

  fn is_closed<Out, Err>(&self) -> bool
  where
    O: Observer<Out, Err>,
  {
    self
      .observer
      .as_ref()
      .map_or(true, |observer| observer.is_closed())
  }
}

// ==================== Observer Structs ====================

/// Observer for source A
pub struct ZipAObserver<O, ItemA, ItemB, F> {
  state: MutArc<ZipState<O, ItemA, ItemB, F>>,
  own: SubscriptionProxy,
  other: SubscriptionProxy,
}

/// Observer for source B
pub struct ZipBObserver<O, ItemA, ItemB, F> {
  state: MutArc<ZipState<O, ItemA, ItemB, F>>,
  own: SubscriptionProxy,
  other: SubscriptionProxy,
}

fn finish<O: Observer<Out, Err>, Out, Err>(
  observer: Option<O>, own: SubscriptionProxy, other: SubscriptionProxy,
) {
  if let Some(observer) = observer {
    own.unsubscribe();
    other.unsubscribe();
    observer.complete();
  }
}

fn fail<O: Observer<Out, Err>, Out, Err>(
  observer: Option<O>, err: Err, own: SubscriptionProxy, other: SubscriptionProxy,
) {
  own.unsubscribe();
  other.unsubscribe();
  if let Some(observer) = observer {
    observer.error(err);
  }
}

// ==================== CoreObservable Implementation ====================

impl<A, B, F, Out, O> CoreObservable<O> for Zip<A, B, F>
where
  A: ObservableType + CoreObservable<ZipAObserver<O, ItemOf<A>, ItemOf<B>, F>>,
  B: ObservableType<Err = ErrOf<A>> + CoreObservable<ZipBObserver<O, ItemOf<A>, ItemOf<B>, F>>,
  F: FnMut(ItemOf<A>, ItemOf<B>) -> Out,
  O: Observer<Out, ErrOf<A>>,
  A::Unsub: Send + 'static,
  B::Unsub: Send + 'static,
{
  type Unsub = TupleSubscription<SubscriptionProxy, SubscriptionProxy>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Zip { source_a, source_b, combiner } = self;
    let state = MutArc::own(ZipState::new(observer, combiner));
    let a_proxy = SubscriptionProxy::new();
    let b_proxy = SubscriptionProxy::new();

    let a_observer =
      ZipAObserver { state: state.clone(), own: a_proxy.clone(), other: b_proxy.clone() };
    a_proxy.set(source_a.actual_subscribe(a_observer));

    let b_observer = ZipBObserver { state, own: b_proxy.clone(), other: a_proxy.clone() };
    b_proxy.set(source_b.actual_subscribe(b_observer));

    TupleSubscription::new(a_proxy, b_proxy)
  }
}

// ==================== Observer Implementations ====================

impl<ItemA, ItemB, Err, Out, O, F> Observer<ItemA, Err> for ZipAObserver<O, ItemA, ItemB, F>
where
  O: Observer<Out, Err>,
  F: FnMut(ItemA, ItemB) -> Out,
{
  fn next(&mut self, value: ItemA) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      if state.observer.is_none() {
        return;
      }
      let pending = state.buffer_b.pop_front();
      match pending {
        Some(b) => state.emit::<Out, Err>(value, b),
        None => state.buffer_a.push_back(value),
      }
      state.take_if_exhausted()
    };
    finish::<O, Out, Err>(done, self.own.clone(), self.other.clone());
  }

  fn error(self, err: Err) {
    let observer = self.state.rc_deref_mut().observer.take();
    fail::<O, Out, Err>(observer, err, self.own, self.other);
  }

  fn complete(self) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      state.completed_a = true;
      state.take_if_exhausted()
    };
    finish::<O, Out, Err>(done, self.own, self.other);
  }

  fn is_closed(&self) -> bool { self.state.rc_deref().is_closed::<Out, Err>() }
}

impl<ItemA, ItemB, Err, Out, O, F> Observer<ItemB, Err> for ZipBObserver<O, ItemA, ItemB, F>
where
  O: Observer<Out, Err>,
  F: FnMut(ItemA, ItemB) -> Out,
{
  fn next(&mut self, value: ItemB) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      if state.observer.is_none() {
        return;
      }
      let pending = state.buffer_a.pop_front();
      match pending {
        Some(a) => state.emit::<Out, Err>(a, value),
        None => state.buffer_b.push_back(value),
      }
      state.take_if_exhausted()
    };
    finish::<O, Out, Err>(done, self.own.clone(), self.other.clone());
  }

  fn error(self, err: Err) {
    let observer = self.state.rc_deref_mut().observer.take();
    fail::<O, Out, Err>(observer, err, self.own, self.other);
  }

  fn complete(self) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      state.completed_b = true;
      state.take_if_exhausted()
    };
    finish::<O, Out, Err>(done, self.own, self.other);
  }

  fn is_closed(&self) -> bool { self.state.rc_deref().is_closed::<Out, Err>() }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn pairs_by_position() {
    let observer = TestObserver::new();
    from_iter(vec![1, 2, 3])
      .zip(from_iter(vec!["a", "b", "c"]), |n, s| format!("{n}{s}"))
      .subscribe_with(observer.clone());

    observer
      .assert_values(&["1a".to_string(), "2b".into(), "3c".into()])
      .assert_complete();
  }

  #[test]
  fn shorter_side_bounds_the_output() {
    let observer = TestObserver::new();
    from_iter(vec![1, 2, 3, 4, 5])
      .zip(from_iter(vec![10, 20]), |a, b| a + b)
      .subscribe_with(observer.clone());
    observer.assert_values(&[11, 22]).assert_complete();

    let observer = TestObserver::new();
    from_iter(vec![1])
      .zip(from_iter(vec![10, 20, 30]), |a, b| a + b)
      .subscribe_with(observer.clone());
    observer.assert_values(&[11]).assert_complete();
  }

  #[test]
  fn empty_side_completes_without_values() {
    let observer = TestObserver::<i32>::new();
    empty::<i32>()
      .zip(from_iter(vec![1, 2]), |a, b| a + b)
      .subscribe_with(observer.clone());
    observer.assert_no_values().assert_complete();
  }

  #[test]
  fn error_from_either_side_is_forwarded_once() {
    let err = RxError::msg("boom!");
    let observer = TestObserver::new();
    from_iter(vec![10, 20, 30, 40])
      .zip(from_iter(vec![1, 2]).concat_with_error(err.clone()), |a, b| a * b)
      .subscribe_with(observer.clone());
    observer.assert_values(&[10, 40]).assert_error(&err);

    let observer = TestObserver::<i32>::new();
    never::<i32>()
      .zip(throw_err::<i32, _>(err.clone()), |a, b| a + b)
      .subscribe_with(observer.clone());
    observer.assert_no_values().assert_error(&err);
  }

  #[test]
  fn error_cancels_the_other_side() {
    let err = RxError::msg("boom!");
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    interval_on(Duration::from_secs(1), scheduler.clone())
      .zip(throw_err::<usize, _>(err.clone()), |a, b| a + b)
      .subscribe_with(observer.clone());
    scheduler.advance_by(Duration::from_secs(3));
    observer.assert_no_values().assert_error(&err);
    assert!(scheduler.is_empty());

    let observer = TestObserver::new();
    throw_err::<usize, _>(err.clone())
      .zip(interval_on(Duration::from_secs(1), scheduler.clone()), |a, b| a + b)
      .subscribe_with(observer.clone());
    scheduler.advance_by(Duration::from_secs(3));
    observer.assert_no_values().assert_error(&err);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn completes_once_the_finished_side_is_drained() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    from_iter(vec!["x", "y"])
      .zip(interval_on(Duration::from_secs(1), scheduler.clone()), |s, i| (i, s))
      .subscribe_with(observer.clone());

    scheduler.advance_by(Duration::from_secs(1));
    observer.assert_values(&[(0, "x")]).assert_not_complete();

    scheduler.advance_by(Duration::from_secs(1));
    observer.assert_values(&[(0, "x"), (1, "y")]).assert_complete();

    // The interval was cancelled with the completion.
    scheduler.advance_by(Duration::from_secs(5));
    assert!(scheduler.is_empty());
    observer.assert_value_count(2);
  }

  #[test]
  fn unsubscribe_stops_pairing() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    let subscription = interval_on(Duration::from_secs(1), scheduler.clone())
      .zip(interval_on(Duration::from_secs(2), scheduler.clone()), |a, b| (a, b))
      .subscribe_with(observer.clone());

    scheduler.advance_by(Duration::from_secs(4));
    observer.assert_values(&[(0, 0), (1, 1)]);

    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_secs(10));
    observer.assert_value_count(2).assert_not_complete();
    assert!(scheduler.is_empty());
  }
}
