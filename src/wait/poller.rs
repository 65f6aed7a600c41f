// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling with a hard deadline and cooperative cancellation

use crate::constants::poll::{FAR_FUTURE_SECS, INTERVAL_SECS, MIN_INTERVAL_MILLIS, TIMEOUT_SECS};
use crate::error::{Result, WaitError};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Timing of a single wait call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub timeout: Duration,
    /// Probe once before the first sleep
    pub immediate: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(INTERVAL_SECS),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            immediate: true,
        }
    }
}

impl PollOptions {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }
}

/// One unit of work per poll tick.
///
/// `Ok(true)` ends the wait successfully, `Ok(false)` asks for another tick,
/// and `Err` stops polling and is returned to the caller as-is. Probes absorb
/// their own transient failures by returning `Ok(false)`.
pub trait Probe {
    fn probe(&mut self) -> impl Future<Output = Result<bool>>;
}

/// Probe backed by a closure, see [`probe_fn`]
pub struct ProbeFn<F> {
    f: F,
}

/// Wrap a closure returning a future as a [`Probe`]
pub fn probe_fn<F, Fut>(f: F) -> ProbeFn<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    ProbeFn { f }
}

impl<F, Fut> Probe for ProbeFn<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    fn probe(&mut self) -> impl Future<Output = Result<bool>> {
        (self.f)()
    }
}

/// `now + after`, saturating at a far-future instant instead of overflowing
fn instant_after(now: Instant, after: Duration) -> Instant {
    now.checked_add(after)
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS))
}

/// Run `probe` every `options.interval` until it reports done, fails, the
/// deadline passes or `cancel` fires.
///
/// The deadline returns [`WaitError::DeadlineExceeded`], cancellation returns
/// [`WaitError::Cancelled`]. Neither sleeps nor probes run past the deadline.
/// Intervals shorter than [`MIN_INTERVAL_MILLIS`] are raised to it.
pub async fn poll<P: Probe>(
    cancel: &CancellationToken,
    options: &PollOptions,
    probe: &mut P,
) -> Result<()> {
    let deadline = instant_after(Instant::now(), options.timeout);
    let interval = options
        .interval
        .max(Duration::from_millis(MIN_INTERVAL_MILLIS));
    let mut first_tick = true;

    loop {
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled);
        }

        if !(first_tick && options.immediate) {
            let next_tick = instant_after(Instant::now(), interval);
            let wake = next_tick.min(deadline);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(WaitError::Cancelled),
                _ = sleep_until(wake) => {}
            }
            if next_tick > deadline {
                return Err(WaitError::DeadlineExceeded {
                    timeout: options.timeout,
                });
            }
        }
        first_tick = false;

        let done = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WaitError::Cancelled),
            result = probe.probe() => result?,
            _ = sleep_until(deadline) => {
                return Err(WaitError::DeadlineExceeded {
                    timeout: options.timeout,
                })
            }
        };

        if done {
            return Ok(());
        }
    }
}
