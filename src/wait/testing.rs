// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Scripted fetchers for driving waiters tick by tick.

use serde_json::Value;
use std::future::{ready, Ready};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub type Fetched = std::result::Result<Value, String>;

/// A fetch closure that returns `script[n]` on its n-th call and repeats the
/// last entry once the script runs out, plus a counter of calls made.
pub fn scripted_fetch(
    script: Vec<Fetched>,
) -> (impl FnMut() -> Ready<Fetched>, impl Fn() -> usize) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let fetch = move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        let step = script
            .get(n)
            .or_else(|| script.last())
            .cloned()
            .unwrap_or_else(|| Err("empty script".to_string()));
        ready(step)
    };

    (fetch, move || counter.load(Ordering::SeqCst))
}
