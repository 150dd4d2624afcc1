use std::{thread, time::Instant};

use crate::{error::WaitTimeout, scheduler::Duration};

/// How often [`wait_until`] re-checks its condition.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Poll `condition` until it holds or `timeout` passes.
///
/// Returns how long the wait took. The condition is always checked once more
/// at the deadline before giving up.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let waited = wait_until(Duration::from_secs(1), || true).unwrap();
/// assert!(waited < Duration::from_secs(1));
/// ```
pub fn wait_until<F>(timeout: Duration, mut condition: F) -> Result<Duration, WaitTimeout>
where
  F: FnMut() -> bool,
{
  let start = Instant::now();
  loop {
    if condition() {
      return Ok(start.elapsed());
    }
    let elapsed = start.elapsed();
    if elapsed >= timeout {
      return Err(WaitTimeout { timeout });
    }
    thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
  }
}
