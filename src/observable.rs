//! Observable sources and the `Observable` extension trait.
//!
//! An observable is a plain value describing how to produce items. Nothing
//! happens until it is subscribed, and subscribing consumes it: clone the
//! description to subscribe again. Every subscription is an independent
//! execution.

use crate::{
  observer::{FnMutObserver, Observer},
  ops::{
    blocking::{BlockingIter, ChannelObserver},
    concat::Concat,
    subscribe_on::SubscribeOn,
    zip::Zip,
  },
  scheduler::Scheduler,
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionWrapper},
};

mod from_iter;
mod interval;
mod trivial;

pub use from_iter::*;
pub use interval::*;
pub use trivial::*;

/// The item and error types a stream delivers.
pub trait ObservableType {
  type Item;
  type Err;
}

/// A stream that can deliver to observers of type `O`.
///
/// Operators implement this for every observer their upstream can feed,
/// so the whole chain is resolved statically at subscription.
pub trait CoreObservable<O>: ObservableType {
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Shorthand for a stream's item type.
pub type ItemOf<S> = <S as ObservableType>::Item;
/// Shorthand for a stream's error type.
pub type ErrOf<S> = <S as ObservableType>::Err;

/// Composition and consumption methods, available on every stream.
pub trait Observable: ObservableType + Sized {
  /// Pair items of `self` and `other` by position and combine each pair.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// let observer = TestObserver::new();
  /// from_iter(vec!["a", "b", "c"])
  ///   .zip(range(1, 10), |word, n| format!("{n}{word}"))
  ///   .subscribe_with(observer.clone());
  ///
  /// observer.assert_values(&["1a".to_string(), "2b".into(), "3c".into()]).assert_complete();
  /// ```
  fn zip<B, F, Out>(self, other: B, combiner: F) -> Zip<Self, B, F>
  where
    B: ObservableType<Err = Self::Err>,
    F: FnMut(Self::Item, B::Item) -> Out,
  {
    Zip::new(self, other, combiner)
  }

  /// Everything from `self`, then everything from `other`.
  fn concat<B>(self, other: B) -> Concat<Self, B>
  where
    B: ObservableType<Item = Self::Item, Err = Self::Err>,
  {
    Concat::new(self, other)
  }

  /// Everything from `self`, then `err` instead of completion.
  fn concat_with_error(self, err: Self::Err) -> Concat<Self, ThrowErr<Self::Item, Self::Err>> {
    Concat::new(self, throw_err(err))
  }

  /// Perform the subscription itself as a task on `scheduler`.
  fn subscribe_on<SD: Scheduler>(self, scheduler: SD) -> SubscribeOn<Self, SD> {
    SubscribeOn::new(self, scheduler)
  }

  /// Subscribe with a closure that receives every item. Errors and
  /// completion are ignored.
  fn subscribe<F>(
    self, next: F,
  ) -> SubscriptionWrapper<<Self as CoreObservable<Subscriber<FnMutObserver<F>>>>::Unsub>
  where
    F: FnMut(Self::Item),
    Self: CoreObservable<Subscriber<FnMutObserver<F>>>,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  /// Subscribe a full observer.
  fn subscribe_with<O>(
    self, observer: O,
  ) -> SubscriptionWrapper<<Self as CoreObservable<Subscriber<O>>>::Unsub>
  where
    O: Observer<Self::Item, Self::Err>,
    Self: CoreObservable<Subscriber<O>>,
  {
    let (subscriber, closed) = Subscriber::new(observer);
    let upstream = self.actual_subscribe(subscriber);
    SubscriptionWrapper::new(upstream, closed)
  }

  /// Subscribe and consume the stream as a blocking iterator.
  ///
  /// Each `next` call blocks until the stream delivers an item, an error or
  /// completion.
  fn blocking_iter(self) -> BlockingIter<ItemOf<Self>, ErrOf<Self>>
  where
    Self: CoreObservable<ChannelObserver<ItemOf<Self>, ErrOf<Self>>>,
    <Self as CoreObservable<ChannelObserver<ItemOf<Self>, ErrOf<Self>>>>::Unsub: Send + 'static,
  {
    BlockingIter::subscribe(self)
  }
}

impl<T: ObservableType> Observable for T {}
