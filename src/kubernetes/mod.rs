// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes-backed status fetchers and entity listers for the waiters.

pub mod pods;
pub mod resources;

pub use pods::{pod_is_ready, PodLister};
pub use resources::{ResourceFetcher, ResourceType};
