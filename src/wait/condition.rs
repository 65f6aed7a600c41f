// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wait for a single named condition to reach a desired status

use crate::conditions::extract_conditions;
use crate::error::{Result, WaitError};
use crate::types::condition::{Condition, ConditionStatus};
use crate::wait::poller::{poll, PollOptions, Probe};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

struct ConditionProbe<'a, F> {
    fetch: F,
    target: &'a str,
    condition_type: &'a str,
    desired: ConditionStatus,
    last_observed: Option<Condition>,
}

impl<F, Fut, E> Probe for ConditionProbe<'_, F>
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

        let snapshot = match extract_conditions(&doc) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("{} has no conditions yet", self.target);
                return Ok(false);
            }
            Err(e) => {
                debug!("Ignoring unreadable status of {}: {}", self.target, e);
                return Ok(false);
            }
        };

        let Some(condition) = snapshot.get(self.condition_type) else {
            return Ok(false);
        };
        self.last_observed = Some(condition.clone());

        if condition.status == self.desired {
            return Ok(true);
        }

        info!(
            "{} not ready: {}={} ({})",
            self.target, condition.condition_type, condition.status, condition.message
        );
        Ok(false)
    }
}

/// Wait until `condition_type` on the fetched document reports `desired`.
///
/// Fetch failures, missing conditions and unreadable status documents are all
/// treated as "not yet" and retried until the deadline.
#[instrument(skip(cancel, options, fetch))]
pub async fn wait_for_condition<F, Fut, E>(
    cancel: &CancellationToken,
    options: &PollOptions,
    target: &str,
    fetch: F,
    condition_type: &str,
    desired: ConditionStatus,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<Value, E>>,
    E: Display,
{
    let mut probe = ConditionProbe {
        fetch,
        target,
        condition_type,
        desired,
        last_observed: None,
    };

    match poll(cancel, options, &mut probe).await {
        Ok(()) => {
            info!("{} reports {}={}", target, condition_type, desired);
            Ok(())
        }
        Err(WaitError::DeadlineExceeded { .. }) => Err(WaitError::ConditionTimeout {
            target: target.to_string(),
            condition_type: condition_type.to_string(),
            desired: desired.to_string(),
            last_observed: probe.last_observed,
        }),
        Err(e) => Err(e),
    }
}
