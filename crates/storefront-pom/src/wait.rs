// Condition-based waiting
//
// Every synchronization point polls a condition against the live document
// with a bounded timeout. There are no fixed-duration sleeps in the suite.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default polling interval for waits (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `check` until it returns `Ok(true)` or `timeout` elapses.
///
/// The check always runs at least once, so a zero timeout degenerates into a
/// single call. Errors from `check` are returned immediately.
///
/// # Errors
///
/// Returns [`Error::Timeout`] naming `what` when the deadline passes.
pub async fn poll_until<F, Fut>(
    what: impl FnOnce() -> String,
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        if check().await? {
            return Ok(());
        }

        if start.elapsed() >= timeout {
            return Err(Error::Timeout {
                what: what(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }

        tokio::time::sleep(interval).await;
    }
}
