// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod listing and the pod readiness predicate

use crate::constants::conditions::{CONTAINERS_READY, READY};
use crate::constants::POD_PHASE_RUNNING;
use crate::error::Result;
use crate::types::condition::ConditionStatus;
use crate::wait::Identified;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::instrument;

impl Identified for Pod {
    fn identity(&self) -> String {
        self.name_any()
    }
}

/// A pod counts as ready when it is Running and reports both Ready and
/// ContainersReady as True
pub fn pod_is_ready(pod: &Pod) -> bool {
    let Some(status) = pod.status.as_ref() else {
        return false;
    };
    if status.phase.as_deref() != Some(POD_PHASE_RUNNING) {
        return false;
    }

    let is_true = |condition_type: &str| {
        status.conditions.as_ref().is_some_and(|conditions| {
            conditions.iter().any(|c| {
                c.type_ == condition_type
                    && ConditionStatus::parse(&c.status) == ConditionStatus::True
            })
        })
    };

    is_true(READY) && is_true(CONTAINERS_READY)
}

/// Lists the pods of one namespace
#[derive(Clone)]
pub struct PodLister {
    api: Api<Pod>,
}

impl PodLister {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Pod>> {
        Ok(self.api.list(&ListParams::default()).await?.items)
    }
}
