// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Compute pool for running transformation ranges off the calling thread.

mod pool;

pub use pool::{ComputePool, PoolState};
