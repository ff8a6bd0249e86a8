// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Parallel regroup engine.
//!
//! One call to [`Transformer::apply`] generalizes every work item of a
//! transition (raw rows, previous equivalence classes or snapshot entries)
//! and groups the results into a target [`Grouping`](strata_core::Grouping).
//! A cost model decides how many threads the call is worth; the work is split
//! into contiguous ranges, range `0` runs on the calling thread, the rest on a
//! compute pool, and the private groupings of the pooled ranges are merged
//! into the target afterwards.

pub mod classify;
pub mod config;
pub mod driver;
pub mod estimate;
pub mod merge;
pub mod partition;
pub mod stats;
mod transformer;
pub mod worker;

pub use config::TransformerConfig;
pub use driver::{Dispatch, ParallelDriver, SameThreadedDriver, TransformDriver, TransformJob};
pub use stats::TransformStats;
pub use strata_type::{Error, Result};
pub use transformer::{TransformRequest, Transformer};
pub use worker::{Input, RangeWorker, WorkerContext};
