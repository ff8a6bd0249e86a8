// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	ops::Range,
	panic::{self, AssertUnwindSafe},
};

use crossbeam_channel::bounded;
use strata_core::Grouping;
use strata_runtime::compute::{ComputePool, PoolState};
use strata_type::{Error, Result};
use tracing::{Span, debug, trace_span};

use super::{Dispatch, TransformDriver, TransformJob};
use crate::{
	config::TransformerConfig,
	estimate::{clamp_threads, optimal_threads},
	merge::{PartialGrouping, merge_partial},
	partition,
	worker::{RangeWorker, WorkerContext},
};

/// Splits a call into ranges and runs all but the first on a compute pool.
///
/// Range `0` is processed on the calling thread straight into the target.
/// Every other range gets its own slot from a fixed arena of worker-local
/// groupings; once a range completes its slot is drained and the classes
/// are sent back over a channel, where they are merged into the target in
/// completion order.
pub struct ParallelDriver {
	pool: ComputePool,
	slots: Vec<Grouping>,
	threads: usize,
	overhead: f64,
}

impl ParallelDriver {
	pub fn new(config: &TransformerConfig) -> Self {
		let workers = config.threads.saturating_sub(1);
		let slots = (0..workers).map(|_| Grouping::with_capacity(config.slot_capacity())).collect();

		Self {
			pool: ComputePool::new(workers, config.thread_name_prefix.clone()),
			slots,
			threads: config.threads,
			overhead: config.overhead,
		}
	}

	pub fn pool_state(&self) -> PoolState {
		self.pool.state()
	}

	/// Threads the cost model grants `job`.
	pub fn plan(&self, job: &TransformJob<'_>) -> usize {
		let estimate = optimal_threads(job.collapse_factor, self.overhead);
		clamp_threads(estimate, self.threads, job.total)
	}
}

impl TransformDriver for ParallelDriver {
	fn apply(&mut self, job: &TransformJob<'_>, target: &mut Grouping) -> Result<Dispatch> {
		if self.pool.state() == PoolState::ShutDown {
			return Err(Error::PoolShutDown);
		}

		let threads = self.plan(job);
		debug!(
			strategy = %job.ctx.input.strategy(),
			total = job.total,
			collapse_factor = job.collapse_factor,
			threads,
			"dispatching transformation"
		);

		if threads == 1 {
			let _span = trace_span!("transform::inline", start = 0, end = job.total).entered();
			run_inline(&job.worker, &job.ctx, 0..job.total, target)?;
			return Ok(Dispatch::INLINE);
		}

		let ranges = partition::ranges(job.total, threads);
		let inline = ranges[0].clone();
		let pooled = &ranges[1..];

		let Self {
			pool,
			slots,
			..
		} = self;
		let worker = &job.worker;
		let ctx = &job.ctx;

		let (result_tx, result_rx) = bounded::<Result<PartialGrouping>>(pooled.len());

		let merged = pool.in_place_scope(|scope| {
			let submit_span = trace_span!("transform::submit_ranges", range_count = pooled.len()).entered();

			for (slot, range) in slots.iter_mut().zip(pooled.iter().cloned()) {
				let result_tx = result_tx.clone();

				// Capture parent span for context propagation to the pool thread
				let parent_span = Span::current();

				scope.spawn(move |_| {
					let _guard = trace_span!(
						parent: parent_span,
						"transform::range",
						start = range.start,
						end = range.end
					)
					.entered();

					let _ = result_tx.send(run_pooled(worker, ctx, range, slot));
				});
			}

			// Drop our copy of the sender so the channel closes when all ranges complete
			drop(result_tx);
			drop(submit_span);

			let inline_result = {
				let _span = trace_span!("transform::inline", start = inline.start, end = inline.end).entered();
				run_inline(worker, ctx, inline, target)
			};

			let _await_span = trace_span!("transform::await_results").entered();

			// Keep receiving after a failure so every slot is released before returning
			let mut failure = inline_result.err();
			let mut merged = 0usize;
			while let Ok(result) = result_rx.recv() {
				match result {
					Ok(partial) if failure.is_none() => {
						let _merge_span = trace_span!("transform::merge", classes = partial.len()).entered();
						merge_partial(target, partial);
						merged += 1;
					}
					Ok(_) => {}
					Err(e) => {
						failure.get_or_insert(e);
					}
				}
			}

			match failure {
				Some(e) => Err(e),
				None => Ok(merged),
			}
		})??;

		debug!(threads, merged, classes = target.len(), "transformation complete");
		Ok(Dispatch {
			threads,
		})
	}

	fn shutdown(&mut self) {
		self.pool.shutdown();
		self.slots.clear();
	}

	fn name(&self) -> &str {
		"parallel"
	}
}

fn run_inline(worker: &RangeWorker, ctx: &WorkerContext<'_>, range: Range<usize>, target: &mut Grouping) -> Result<()> {
	match panic::catch_unwind(AssertUnwindSafe(|| worker.process(ctx, range, target))) {
		Ok(result) => result.map_err(Error::transform),
		Err(payload) => Err(panicked(payload)),
	}
}

fn run_pooled(
	worker: &RangeWorker,
	ctx: &WorkerContext<'_>,
	range: Range<usize>,
	slot: &mut Grouping,
) -> Result<PartialGrouping> {
	let outcome = panic::catch_unwind(AssertUnwindSafe(|| worker.process(ctx, range, slot)));
	match outcome {
		Ok(Ok(())) => Ok(slot.drain_ordered()),
		Ok(Err(e)) => {
			slot.clear();
			Err(Error::transform(e))
		}
		Err(payload) => {
			slot.clear();
			Err(panicked(payload))
		}
	}
}

fn panicked(payload: Box<dyn Any + Send>) -> Error {
	let message = if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"worker panicked".to_string()
	};
	Error::transform(Error::WorkerPanicked {
		message,
	})
}
