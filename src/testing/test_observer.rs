use std::{fmt::Debug, sync::Arc, time::Instant};

use parking_lot::{Condvar, Mutex};

use crate::{error::RxError, observer::Observer, scheduler::Duration};

/// An observer that records everything it receives.
///
/// Clones share the same record, so subscribe one clone and assert on
/// another, from any thread. The `assert_*` methods panic with a description
/// of what was recorded and return `&Self` for chaining.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let observer = TestObserver::new();
/// from_iter(vec![1, 2]).subscribe_with(observer.clone());
/// observer.assert_values(&[1, 2]).assert_complete().assert_no_errors();
/// ```
pub struct TestObserver<Item, Err = RxError> {
  inner: Arc<Inner<Item, Err>>,
}

struct Inner<Item, Err> {
  record: Mutex<Record<Item, Err>>,
  terminated: Condvar,
}

struct Record<Item, Err> {
  values: Vec<Item>,
  errors: Vec<Err>,
  completions: usize,
}

impl<Item, Err> Record<Item, Err> {
  fn is_terminated(&self) -> bool { self.completions > 0 || !self.errors.is_empty() }

  fn summary(&self) -> String {
    format!(
      "values: {}, errors: {}, completions: {}",
      self.values.len(),
      self.errors.len(),
      self.completions
    )
  }
}

impl<Item, Err> Clone for TestObserver<Item, Err> {
  fn clone(&self) -> Self { TestObserver { inner: self.inner.clone() } }
}

impl<Item, Err> Default for TestObserver<Item, Err> {
  fn default() -> Self {
    let record = Record { values: Vec::new(), errors: Vec::new(), completions: 0 };
    TestObserver { inner: Arc::new(Inner { record: Mutex::new(record), terminated: Condvar::new() }) }
  }
}

impl<Item, Err> TestObserver<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn value_count(&self) -> usize { self.inner.record.lock().values.len() }

  pub fn is_completed(&self) -> bool { self.inner.record.lock().completions > 0 }

  pub fn is_terminated(&self) -> bool { self.inner.record.lock().is_terminated() }

  pub fn values(&self) -> Vec<Item>
  where
    Item: Clone,
  {
    self.inner.record.lock().values.clone()
  }

  /// The first error received, if any.
  pub fn first_error(&self) -> Option<Err>
  where
    Err: Clone,
  {
    self.inner.record.lock().errors.first().cloned()
  }

  /// Block until the stream completes or fails, or `timeout` passes.
  /// Returns whether a terminal event was seen.
  pub fn await_terminal_event(&self, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    let mut record = self.inner.record.lock();
    while !record.is_terminated() {
      if self
        .inner
        .terminated
        .wait_until(&mut record, deadline)
        .timed_out()
      {
        break;
      }
    }
    record.is_terminated()
  }

  #[track_caller]
  pub fn assert_complete(&self) -> &Self {
    let record = self.inner.record.lock();
    match record.completions {
      1 => self,
      0 => panic!("not completed ({})", record.summary()),
      _ => panic!("multiple completions ({})", record.summary()),
    }
  }

  #[track_caller]
  pub fn assert_not_complete(&self) -> &Self {
    let record = self.inner.record.lock();
    assert!(record.completions == 0, "completed ({})", record.summary());
    self
  }

  #[track_caller]
  pub fn assert_value_count(&self, count: usize) -> &Self {
    let record = self.inner.record.lock();
    assert!(
      record.values.len() == count,
      "expected {count} values ({})",
      record.summary()
    );
    self
  }

  #[track_caller]
  pub fn assert_no_values(&self) -> &Self { self.assert_value_count(0) }

  #[track_caller]
  pub fn assert_values(&self, expected: &[Item]) -> &Self
  where
    Item: PartialEq + Debug,
  {
    let record = self.inner.record.lock();
    assert!(
      record.values == expected,
      "values differ\n  expected: {expected:?}\n  actual:   {:?}",
      record.values
    );
    self
  }

  #[track_caller]
  pub fn assert_error(&self, expected: &Err) -> &Self
  where
    Err: PartialEq + Debug,
  {
    let record = self.inner.record.lock();
    match record.errors.as_slice() {
      [err] if err == expected => self,
      [err] => panic!("expected error {expected:?}, got {err:?}"),
      [] => panic!("no error received ({})", record.summary()),
      errors => panic!("multiple errors: {errors:?}"),
    }
  }

  #[track_caller]
  pub fn assert_no_errors(&self) -> &Self
  where
    Err: Debug,
  {
    let record = self.inner.record.lock();
    assert!(record.errors.is_empty(), "unexpected errors: {:?}", record.errors);
    self
  }
}

impl<Item, Err> Observer<Item, Err> for TestObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.inner.record.lock().values.push(value); }

  fn error(self, err: Err) {
    self.inner.record.lock().errors.push(err);
    self.inner.terminated.notify_all();
  }

  fn complete(self) {
    self.inner.record.lock().completions += 1;
    self.inner.terminated.notify_all();
  }

  fn is_closed(&self) -> bool { false }
}
