// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use convergence_waiter::config::{Config, WaitMode};
use convergence_waiter::kubernetes::{pod_is_ready, PodLister, ResourceFetcher};
use convergence_waiter::types::ConditionStatus;
use convergence_waiter::wait::{wait_for_all_ready, wait_for_condition, wait_for_convergence};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: mode={:?}, namespace={:?}, interval={:?}, timeout={:?}",
        config.mode, config.namespace, config.poll.interval, config.poll.timeout
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Ctrl-C cancels the wait instead of killing it mid-request
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling wait");
            on_signal.cancel();
        }
    });

    let namespace = config.namespace.as_deref();
    match &config.mode {
        WaitMode::Condition {
            name,
            condition_type,
        } => {
            let fetcher = ResourceFetcher::new(client, &config.resource, namespace, name);
            wait_for_condition(
                &cancel,
                &config.poll,
                fetcher.target(),
                || fetcher.fetch(),
                condition_type,
                ConditionStatus::True,
            )
            .await?;
        }
        WaitMode::Convergence {
            name,
            degraded_type,
        } => {
            let fetcher = ResourceFetcher::new(client, &config.resource, namespace, name);
            wait_for_convergence(
                &cancel,
                &config.poll,
                fetcher.target(),
                || fetcher.fetch(),
                convergence_waiter::constants::conditions::READY,
                degraded_type,
            )
            .await?;
        }
        WaitMode::Pods { prefixes } => {
            let lister = PodLister::new(client, namespace.unwrap_or("default"));
            wait_for_all_ready(&cancel, &config.poll, || lister.list(), prefixes, pod_is_ready)
                .await?;
        }
    }

    info!("Wait completed successfully");
    Ok(())
}
