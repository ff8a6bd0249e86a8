// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::Grouping;
use strata_type::{Error, Result};
use tracing::trace_span;

use super::{Dispatch, TransformDriver, TransformJob};

/// Processes every work item on the calling thread.
#[derive(Debug, Default)]
pub struct SameThreadedDriver;

impl SameThreadedDriver {
	pub fn new() -> Self {
		Self {}
	}
}

impl TransformDriver for SameThreadedDriver {
	fn apply(&mut self, job: &TransformJob<'_>, target: &mut Grouping) -> Result<Dispatch> {
		let _span = trace_span!("transform::inline", start = 0, end = job.total).entered();
		job.worker.process(&job.ctx, 0..job.total, target).map_err(Error::transform)?;
		Ok(Dispatch::INLINE)
	}

	fn shutdown(&mut self) {}

	fn name(&self) -> &str {
		"same-threaded"
	}
}
