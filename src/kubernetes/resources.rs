// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status fetching for arbitrary custom resources

use crate::error::Result;
use kube::{
    api::DynamicObject,
    core::{ApiResource, GroupVersionKind},
    Api, Client,
};
use serde_json::Value;
use tracing::instrument;

/// Identifies the resource type to fetch by group, version, kind and plural
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
}

impl ResourceType {
    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&self.group, &self.version, &self.kind),
            &self.plural,
        )
    }
}

/// Fetches one named resource as a JSON document, status included
#[derive(Clone)]
pub struct ResourceFetcher {
    api: Api<DynamicObject>,
    name: String,
    target: String,
}

impl ResourceFetcher {
    /// `namespace: None` addresses a cluster-scoped resource
    pub fn new(
        client: Client,
        resource: &ResourceType,
        namespace: Option<&str>,
        name: &str,
    ) -> Self {
        let ar = resource.api_resource();
        let (api, target) = match namespace {
            Some(ns) => (
                Api::namespaced_with(client, ns, &ar),
                format!("{} {}/{}", resource.kind, ns, name),
            ),
            None => (Api::all_with(client, &ar), format!("{} {}", resource.kind, name)),
        };

        Self {
            api,
            name: name.to_string(),
            target,
        }
    }

    /// Human readable description used in logs and errors
    pub fn target(&self) -> &str {
        &self.target
    }

    #[instrument(skip(self), fields(target = %self.target))]
    pub async fn fetch(&self) -> Result<Value> {
        let object = self.api.get(&self.name).await?;
        Ok(serde_json::to_value(&object)?)
    }
}
