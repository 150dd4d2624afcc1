//! Helpers for testing streams: a recording observer and a polling wait.

mod test_observer;
mod wait;

pub use test_observer::TestObserver;
pub use wait::{wait_until, POLL_INTERVAL};
