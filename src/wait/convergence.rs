// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Two-condition convergence: wait for Ready while failing fast on Degraded

use crate::conditions::extract_conditions;
use crate::error::{Result, WaitError};
use crate::types::condition::Condition;
use crate::wait::poller::{poll, PollOptions, Probe};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Where a convergence wait stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Convergence {
    /// Nothing observed yet, or the resource could not be fetched
    Unknown,
    /// At least one of the two conditions is missing or Ready is not True
    AwaitingBoth,
    Degraded,
    Ready,
}

struct ConvergenceProbe<'a, F> {
    fetch: F,
    target: &'a str,
    ready_type: &'a str,
    degraded_type: &'a str,
    ready: Option<Condition>,
    degraded: Option<Condition>,
}

impl<F> ConvergenceProbe<'_, F> {
    fn state(&self) -> Convergence {
        if self.degraded.as_ref().is_some_and(Condition::is_true) {
            return Convergence::Degraded;
        }
        match (&self.ready, &self.degraded) {
            (None, None) => Convergence::Unknown,
            (Some(ready), Some(_)) if ready.is_true() => Convergence::Ready,
            _ => Convergence::AwaitingBoth,
        }
    }
}

impl<F, Fut, E> Probe for ConvergenceProbe<'_, F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<Value, E>>,
    E: Display,
{
    async fn probe(&mut self) -> Result<bool> {
        let doc = match (self.fetch)().await {
            Ok(doc) => doc,
            Err(e) => {
                debug!("Failed to fetch {}, retrying: {}", self.target, e);
                return Ok(false);
            }
        };

        let Some(snapshot) = extract_conditions(&doc).map_err(|e| match e {
            WaitError::MalformedStatus(detail) => WaitError::MalformedStatus(format!(
                "failed to extract conditions from {}: {}",
                self.target, detail
            )),
            other => other,
        })?
        else {
            debug!("{} has no conditions yet", self.target);
            return Ok(false);
        };

        if let Some(ready) = snapshot.get(self.ready_type) {
            self.ready = Some(ready.clone());
        }
        if let Some(degraded) = snapshot.get(self.degraded_type) {
            self.degraded = Some(degraded.clone());
        }

        match self.state() {
            Convergence::Degraded => {
                let message = self
                    .degraded
                    .as_ref()
                    .map(|c| c.message.clone())
                    .unwrap_or_default();
                warn!("{} is degraded: {}", self.target, message);
                Err(WaitError::Degraded {
                    target: self.target.to_string(),
                    message,
                })
            }
            Convergence::Ready => Ok(true),
            state => {
                debug!(
                    "{} has not converged ({:?}): {}={}, {}={}",
                    self.target,
                    state,
                    self.ready_type,
                    observed_status(&self.ready),
                    self.degraded_type,
                    observed_status(&self.degraded)
                );
                Ok(false)
            }
        }
    }
}

fn observed_status(condition: &Option<Condition>) -> &'static str {
    condition.as_ref().map_or("not set", |c| c.status.as_str())
}

/// Wait until the fetched resource reports `ready_type=True` with
/// `degraded_type` present and not True.
///
/// `degraded_type=True` at any tick ends the wait with [`WaitError::Degraded`],
/// even when Ready is True in the same snapshot. Success requires both
/// conditions to have been reported at least once, so a resource that never
/// publishes `degraded_type` runs into the deadline. On timeout the error
/// carries the last observed value of both conditions.
#[instrument(skip(cancel, options, fetch))]
pub async fn wait_for_convergence<F, Fut, E>(
    cancel: &CancellationToken,
    options: &PollOptions,
    target: &str,
    fetch: F,
    ready_type: &str,
    degraded_type: &str,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<Value, E>>,
    E: Display,
{
    let mut probe = ConvergenceProbe {
        fetch,
        target,
        ready_type,
        degraded_type,
        ready: None,
        degraded: None,
    };

    match poll(cancel, options, &mut probe).await {
        Ok(()) => {
            info!("{} has converged", target);
            Ok(())
        }
        Err(WaitError::DeadlineExceeded { .. }) => Err(WaitError::ConvergenceTimeout {
            target: target.to_string(),
            ready: probe.ready,
            degraded: probe.degraded,
        }),
        Err(e) => Err(e),
    }
}
