// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Condition types checked by the waiters
pub mod conditions {
    pub const READY: &str = "Ready";
    pub const DEGRADED: &str = "Degraded";
    /// Pod condition that must accompany Ready for a pod to count as healthy
    pub const CONTAINERS_READY: &str = "ContainersReady";
}

/// Polling defaults
pub mod poll {
    /// Fixed interval between probes in seconds
    pub const INTERVAL_SECS: u64 = 5;
    /// Default deadline in seconds
    pub const TIMEOUT_SECS: u64 = 120;
    /// Shortest interval between probes; smaller intervals are raised to this
    pub const MIN_INTERVAL_MILLIS: u64 = 100;
    /// Stand-in deadline, about 30 years out, for timeouts too large to add to now
    pub const FAR_FUTURE_SECS: u64 = 86400 * 365 * 30;
}

/// Pod phase required before a pod's conditions are considered
pub const POD_PHASE_RUNNING: &str = "Running";

/// Resource waited on when no group/version/resource is configured
pub mod default_resource {
    pub const GROUP: &str = "operator.openshift.io";
    pub const VERSION: &str = "v1alpha1";
    pub const KIND: &str = "ExternalSecretsConfig";
    pub const PLURAL: &str = "externalsecretsconfigs";
}
