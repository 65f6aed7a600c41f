// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wait for a fixed set of entities, matched by name prefix, to all be healthy

use crate::error::{Result, WaitError};
use crate::wait::poller::{poll, PollOptions, Probe};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// An entity that can be matched against expected identifiers
pub trait Identified {
    fn identity(&self) -> String;
}

/// What one tick saw: matched identity -> healthy, rebuilt on every tick
#[derive(Debug, Default)]
struct EntitySet {
    matched: BTreeMap<String, bool>,
    missing: Vec<String>,
}

impl EntitySet {
    fn observe<T: Identified>(
        entities: &[T],
        expected: &[String],
        is_healthy: impl Fn(&T) -> bool,
    ) -> Self {
        let mut matched = BTreeMap::new();
        for entity in entities {
            let identity = entity.identity();
            if expected.iter().any(|prefix| identity.starts_with(prefix.as_str())) {
                matched.insert(identity, is_healthy(entity));
            }
        }

        let missing = expected
            .iter()
            .filter(|prefix| !matched.keys().any(|id| id.starts_with(prefix.as_str())))
            .cloned()
            .collect();

        Self { matched, missing }
    }

    fn unhealthy(&self) -> Vec<String> {
        self.matched
            .iter()
            .filter(|(_, healthy)| !**healthy)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn all_ready(&self) -> bool {
        self.missing.is_empty() && self.matched.values().all(|healthy| *healthy)
    }
}

struct EntitiesProbe<'a, L, H> {
    list: L,
    expected: &'a [String],
    is_healthy: H,
    last: Option<EntitySet>,
}

impl<T, L, Fut, E, H> Probe for EntitiesProbe<'_, L, H>
where
    T: Identified,
    L: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<Vec<T>, E>>,
    E: Display,
    H: Fn(&T) -> bool,
{
    async fn probe(&mut self) -> Result<bool> {
        let entities = match (self.list)().await {
            Ok(entities) => entities,
            Err(e) => {
                debug!("Failed to list entities, retrying: {}", e);
                return Ok(false);
            }
        };

        let set = EntitySet::observe(&entities, self.expected, &self.is_healthy);
        let ready = set.all_ready();
        if !ready {
            debug!(
                "Waiting for entities: missing={:?}, unhealthy={:?}",
                set.missing,
                set.unhealthy()
            );
        }
        self.last = Some(set);
        Ok(ready)
    }
}

/// Wait until every prefix in `expected` matches at least one listed entity
/// and every matching entity passes `is_healthy`.
///
/// Several entities may match one prefix (replicas of one workload). Entities
/// matching no prefix are ignored. Listing failures are retried.
#[instrument(skip(cancel, options, list, is_healthy))]
pub async fn wait_for_all_ready<T, L, Fut, E, H>(
    cancel: &CancellationToken,
    options: &PollOptions,
    list: L,
    expected: &[String],
    is_healthy: H,
) -> Result<()>
where
    T: Identified,
    L: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<Vec<T>, E>>,
    E: Display,
    H: Fn(&T) -> bool,
{
    let mut probe = EntitiesProbe {
        list,
        expected,
        is_healthy,
        last: None,
    };

    match poll(cancel, options, &mut probe).await {
        Ok(()) => {
            info!("All expected entities are ready: {:?}", expected);
            Ok(())
        }
        Err(WaitError::DeadlineExceeded { .. }) => {
            let (missing, unhealthy) = match probe.last {
                Some(set) => {
                    let unhealthy = set.unhealthy();
                    (set.missing, unhealthy)
                }
                None => (expected.to_vec(), Vec::new()),
            };
            Err(WaitError::EntitiesTimeout { missing, unhealthy })
        }
        Err(e) => Err(e),
    }
}
