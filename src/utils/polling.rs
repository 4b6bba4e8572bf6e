use std::future::Future;

use log::{debug, warn};
use tokio::time::sleep;

use super::BackoffPolicy;

/// Result of a single check inside [`poll_with_backoff`].
#[derive(Debug, PartialEq)]
pub enum PollStep<T, E> {
    /// The condition is met.
    Ready(T),
    /// Not yet; try again after the backoff delay.
    Pending,
    /// Stop polling with an error.
    Abort(E),
}

#[derive(Debug, PartialEq)]
pub enum PollOutcome<T> {
    Ready { value: T, attempts: u32 },
    Exhausted { attempts: u32 },
}

/// Polls `check` until it is ready, aborts, or the policy's attempt ceiling is reached.
///
/// `check` receives the 1-based attempt number. Between pending checks the
/// loop sleeps for the policy's backoff delay; no sleep follows the last attempt.
///
/// # Returns
/// * `Ok(PollOutcome::Ready)` - the check succeeded
/// * `Ok(PollOutcome::Exhausted)` - every attempt was pending
/// * `Err(e)` - the check aborted
pub async fn poll_with_backoff<T, E, F, Fut>(
    policy: &BackoffPolicy,
    operation_name: &str,
    mut check: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = PollStep<T, E>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;
        debug!(
            "{} attempt {}/{}",
            operation_name, attempts, policy.max_attempts
        );

        match check(attempts).await {
            PollStep::Ready(value) => {
                debug!("{} completed after {} attempt(s)", operation_name, attempts);
                return Ok(PollOutcome::Ready { value, attempts });
            }
            PollStep::Abort(e) => return Err(e),
            PollStep::Pending => {}
        }

        if !policy.should_retry(attempts) {
            warn!("{} gave up after {} attempts", operation_name, attempts);
            return Ok(PollOutcome::Exhausted { attempts });
        }

        sleep(policy.backoff_duration(attempts)).await;
    }
}
