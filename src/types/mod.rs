// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed condition values observed on watched resources.

pub mod condition;

pub use condition::{Condition, ConditionStatus, StatusSnapshot};
