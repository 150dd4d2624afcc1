use std::ops::Range;

use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Emission stops early once the observer is closed, so an unbounded
/// iterator is fine as long as something downstream ends the stream.
///
/// ```
/// use rxlite::prelude::*;
///
/// let mut sum = 0;
/// from_iter(vec![1, 2, 3]).subscribe(|v| sum += v);
/// assert_eq!(sum, 6);
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Iter: IntoIterator> ObservableType for ObservableIter<Iter> {
  type Item = Iter::Item;
  type Err = RxError;
}

impl<Iter, O> CoreObservable<O> for ObservableIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for v in self.0 {
      if observer.is_closed() {
        return;
      }
      observer.next(v);
    }
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

/// `count` consecutive integers starting at `start`.
///
/// The range stops at `i64::MAX` if `start + count` would overflow.
pub fn range(start: i64, count: usize) -> ObservableIter<Range<i64>> {
  let count = i64::try_from(count).unwrap_or(i64::MAX);
  from_iter(start..start.saturating_add(count))
}
