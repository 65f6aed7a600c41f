// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::Condition;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaitError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to serialize resource: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed status document: {0}")]
    MalformedStatus(String),

    #[error("{target} is degraded: {message}")]
    Degraded { target: String, message: String },

    #[error("Deadline of {timeout:?} exceeded")]
    DeadlineExceeded { timeout: Duration },

    #[error(
        "timeout waiting for {target} to report {condition_type}={desired}: last observed {}",
        describe_condition(.last_observed)
    )]
    ConditionTimeout {
        target: String,
        condition_type: String,
        desired: String,
        last_observed: Option<Condition>,
    },

    #[error(
        "timeout waiting for {target} to be ready: Ready={}, Degraded={}",
        describe_condition(.ready),
        describe_condition(.degraded)
    )]
    ConvergenceTimeout {
        target: String,
        ready: Option<Condition>,
        degraded: Option<Condition>,
    },

    #[error("timeout waiting for entities to be ready: missing={missing:?}, unhealthy={unhealthy:?}")]
    EntitiesTimeout {
        missing: Vec<String>,
        unhealthy: Vec<String>,
    },

    #[error("Wait cancelled")]
    Cancelled,
}

impl WaitError {
    /// True for every variant produced by an elapsed deadline, whichever waiter raised it
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            WaitError::DeadlineExceeded { .. }
                | WaitError::ConditionTimeout { .. }
                | WaitError::ConvergenceTimeout { .. }
                | WaitError::EntitiesTimeout { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WaitError::Cancelled)
    }
}

/// Render a last-observed condition for timeout diagnostics
pub fn describe_condition(condition: &Option<Condition>) -> String {
    match condition {
        Some(c) => format!(
            "{} (reason: {}, message: {})",
            c.status, c.reason, c.message
        ),
        None => "not set".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, WaitError>;
