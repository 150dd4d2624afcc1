//! Blocking consumption.
//!
//! The stream pushes into a channel from whatever thread it runs on; the
//! iterator pulls from the other end on the consumer's thread.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  mpsc::{channel, Receiver, RecvTimeoutError, Sender},
  Arc,
};

use tracing::trace;

use crate::{
  error::BlockingError,
  observable::CoreObservable,
  observer::Observer,
  scheduler::Duration,
  subscription::{BoxedSubscription, Subscription},
};

/// One event handed from the stream to the blocking side.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

/// The sending half, subscribed to the stream.
pub struct ChannelObserver<Item, Err> {
  sender: Sender<Notification<Item, Err>>,
  dropped: Arc<AtomicBool>,
}

impl<Item, Err> Observer<Item, Err> for ChannelObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    // A failed send means the iterator is gone, which `is_closed` reports.
    let _ = self.sender.send(Notification::Next(value));
  }

  fn error(self, err: Err) { let _ = self.sender.send(Notification::Error(err)); }

  fn complete(self) { let _ = self.sender.send(Notification::Complete); }

  fn is_closed(&self) -> bool { self.dropped.load(Ordering::Acquire) }
}

/// Iterator over a stream's items, blocking for each one.
///
/// Yields `Ok(item)` for every item, `Err(BlockingError::Upstream(e))` once if
/// the stream fails, and ends after completion. With a timeout, a wait that
/// runs out yields `Err(BlockingError::Timeout(_))` and ends the iteration.
/// A stream that drops its observer without terminating can never deliver
/// again: that ends the iteration with `Err(BlockingError::Disconnected)`, or
/// with `Timeout` once the timeout passes when one is set.
/// Dropping the iterator cancels the subscription.
pub struct BlockingIter<Item, Err> {
  receiver: Receiver<Notification<Item, Err>>,
  subscription: Option<BoxedSubscription>,
  dropped: Arc<AtomicBool>,
  timeout: Option<Duration>,
  done: bool,
}

impl<Item, Err> BlockingIter<Item, Err> {
  pub(crate) fn subscribe<S>(source: S) -> Self
  where
    S: CoreObservable<ChannelObserver<Item, Err>>,
    S::Unsub: Send + 'static,
  {
    let (sender, receiver) = channel();
    let dropped = Arc::new(AtomicBool::new(false));
    let observer = ChannelObserver { sender, dropped: dropped.clone() };
    let subscription = BoxedSubscription::new(source.actual_subscribe(observer));
    BlockingIter { receiver, subscription: Some(subscription), dropped, timeout: None, done: false }
  }

  /// Bound every wait for the next event by `timeout`.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  fn finish(&mut self) {
    self.done = true;
    self.dropped.store(true, Ordering::Release);
    if let Some(subscription) = self.subscription.take() {
      subscription.unsubscribe();
    }
  }
}

impl<Item, Err> Iterator for BlockingIter<Item, Err> {
  type Item = Result<Item, BlockingError<Err>>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    let received = match self.timeout {
      None => self.receiver.recv().map_err(|_| None),
      Some(timeout) => self.receiver.recv_timeout(timeout).map_err(|err| match err {
        RecvTimeoutError::Timeout => Some(timeout),
        RecvTimeoutError::Disconnected => {
          // Nothing can arrive any more: the wait runs out like any other.
          std::thread::sleep(timeout);
          Some(timeout)
        }
      }),
    };

    let notification = match received {
      Ok(notification) => notification,
      Err(Some(timeout)) => {
        trace!(?timeout, "blocking iterator timed out");
        self.finish();
        return Some(Err(BlockingError::Timeout(timeout)));
      }
      Err(None) => {
        self.finish();
        return Some(Err(BlockingError::Disconnected));
      }
    };

    match notification {
      Notification::Next(value) => Some(Ok(value)),
      Notification::Error(err) => {
        self.finish();
        Some(Err(BlockingError::Upstream(err)))
      }
      Notification::Complete => {
        self.finish();
        None
      }
    }
  }
}

impl<Item, Err> Drop for BlockingIter<Item, Err> {
  fn drop(&mut self) { self.finish(); }
}
