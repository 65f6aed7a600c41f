// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Convergence waiters built on a shared poller.

pub mod condition;
pub mod convergence;
pub mod entities;
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use condition::wait_for_condition;
pub use convergence::wait_for_convergence;
pub use entities::{wait_for_all_ready, Identified};
pub use poller::{poll, probe_fn, PollOptions, Probe, ProbeFn};
