// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{conditions, default_resource, poll};
use crate::kubernetes::ResourceType;
use crate::wait::PollOptions;
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// What the waiter binary waits for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitMode {
    /// A single condition on a named resource reaching True
    Condition { name: String, condition_type: String },
    /// Ready=True on a named resource, failing fast on the degraded condition
    Convergence { name: String, degraded_type: String },
    /// Every pod prefix matched by at least one ready pod
    Pods { prefixes: Vec<String> },
}

/// Waiter configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: WaitMode,
    /// Namespace of the resource or pods; None for cluster-scoped resources
    pub namespace: Option<String>,
    pub resource: ResourceType,
    pub poll: PollOptions,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{} environment variable not set", key))
        };
        let seconds = |key: &str, default: u64| -> Result<Duration> {
            match lookup(key) {
                Some(v) => v
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a whole number of seconds, got {:?}", key, v)),
                None => Ok(Duration::from_secs(default)),
            }
        };

        let namespace = lookup("WAIT_NAMESPACE").filter(|ns| !ns.is_empty());

        let mode = match required("WAIT_MODE")?.as_str() {
            "condition" => WaitMode::Condition {
                name: required("WAIT_NAME")?,
                condition_type: var("WAIT_CONDITION", conditions::READY),
            },
            "convergence" => WaitMode::Convergence {
                name: required("WAIT_NAME")?,
                degraded_type: var("WAIT_DEGRADED_CONDITION", conditions::DEGRADED),
            },
            "pods" => {
                if namespace.is_none() {
                    bail!("WAIT_NAMESPACE is required when WAIT_MODE=pods");
                }
                let prefixes: Vec<String> = required("WAIT_POD_PREFIXES")?
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect();
                if prefixes.is_empty() {
                    bail!("WAIT_POD_PREFIXES must name at least one pod prefix");
                }
                WaitMode::Pods { prefixes }
            }
            other => bail!(
                "unknown WAIT_MODE {:?}, expected condition, convergence or pods",
                other
            ),
        };

        let resource = ResourceType {
            group: var("WAIT_GROUP", default_resource::GROUP),
            version: var("WAIT_VERSION", default_resource::VERSION),
            kind: var("WAIT_KIND", default_resource::KIND),
            plural: var("WAIT_RESOURCE", default_resource::PLURAL),
        };

        let poll = PollOptions::default()
            .interval(seconds("WAIT_INTERVAL_SECS", poll::INTERVAL_SECS)?)
            .timeout(seconds("WAIT_TIMEOUT_SECS", poll::TIMEOUT_SECS)?);
        if poll.interval.is_zero() {
            bail!("WAIT_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            mode,
            namespace,
            resource,
            poll,
        })
    }
}
