use std::marker::PhantomData;

use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable that emits no items, just terminates with `err`.
///
/// ```
/// use rxlite::prelude::*;
///
/// let boom = RxError::msg("boom!");
/// let observer = TestObserver::<i32>::new();
/// throw_err(boom.clone()).subscribe_with(observer.clone());
/// observer.assert_no_values().assert_error(&boom);
/// ```
pub fn throw_err<Item, Err>(err: Err) -> ThrowErr<Item, Err> {
  ThrowErr { err, _hint: PhantomData }
}

pub struct ThrowErr<Item, Err> {
  err: Err,
  _hint: PhantomData<fn() -> Item>,
}

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { throw_err(self.err.clone()) }
}

impl<Item, Err> ObservableType for ThrowErr<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> CoreObservable<O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if !observer.is_closed() {
      observer.error(self.err);
    }
  }
}

/// Creates an observable that produces no values and completes immediately.
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { empty() }
}

impl<Item> ObservableType for Empty<Item> {
  type Item = Item;
  type Err = RxError;
}

impl<Item, O> CoreObservable<O> for Empty<Item>
where
  O: Observer<Item, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

/// Creates an observable that never emits anything and never terminates.
///
/// The observer is dropped right away, since nothing can ever reach it.
pub fn never<Item>() -> Never<Item> { Never(PhantomData) }

pub struct Never<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { never() }
}

impl<Item> ObservableType for Never<Item> {
  type Item = Item;
  type Err = RxError;
}

impl<Item, O> CoreObservable<O> for Never<Item>
where
  O: Observer<Item, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, _observer: O) -> Self::Unsub {}
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn throw_delivers_the_same_instance() {
    let err = RxError::msg("boom!");
    let observer = TestObserver::<()>::new();
    throw_err(err.clone()).subscribe_with(observer.clone());

    observer.assert_no_values().assert_error(&err).assert_not_complete();
  }

  #[test]
  fn empty_completes_without_values() {
    let observer = TestObserver::<u8>::new();
    empty().subscribe_with(observer.clone());
    observer.assert_no_values().assert_complete();
  }

  #[test]
  fn never_stays_silent() {
    let observer = TestObserver::<u8>::new();
    never().subscribe_with(observer.clone());
    assert!(!observer.is_terminated());
    observer.assert_no_values();
  }
}
