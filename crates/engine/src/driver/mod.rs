// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Execution strategies for one transformation call.
//!
//! A driver decides how the work items of a [`TransformJob`] are split and
//! where each part runs. [`SameThreadedDriver`] always processes everything
//! on the calling thread; [`ParallelDriver`] consults the cost model and fans
//! the ranges out to a dedicated compute pool.

mod parallel;
mod same;

pub use parallel::ParallelDriver;
pub use same::SameThreadedDriver;
use strata_core::Grouping;
use strata_type::Result;

use crate::worker::{RangeWorker, WorkerContext};

/// One fully validated transformation call.
#[derive(Debug, Clone)]
pub struct TransformJob<'a> {
	pub ctx: WorkerContext<'a>,
	pub worker: RangeWorker,
	/// Number of work items, ranges cover `0..total`.
	pub total: usize,
	pub collapse_factor: f64,
}

/// How a call was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
	/// Threads that processed a range, the calling thread included.
	pub threads: usize,
}

impl Dispatch {
	pub const INLINE: Dispatch = Dispatch {
		threads: 1,
	};

	/// Ranges handed to the compute pool.
	pub fn pooled(&self) -> usize {
		self.threads.saturating_sub(1)
	}
}

pub trait TransformDriver: Send {
	/// Populates `target` with the classes of `job`.
	///
	/// On error `target` may hold a partial result and must be cleared by
	/// the caller.
	fn apply(&mut self, job: &TransformJob<'_>, target: &mut Grouping) -> Result<Dispatch>;

	/// Releases any background resources. Idempotent.
	fn shutdown(&mut self);

	fn name(&self) -> &str;
}
