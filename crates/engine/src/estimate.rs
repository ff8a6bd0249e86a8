// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Cost model for the number of threads a call is worth.
//!
//! With a collapse factor `f` (cost of the call relative to a full scan of
//! the raw rows) and a fixed per-thread overhead `o`, running on `k` threads
//! is modelled as
//!
//! ```text
//! improvement(k) = k²·o + (f − 1)·k + 1
//! ```
//!
//! which is minimal at `k = (1 − f) / 2o`. A negative value means the model
//! expects `k` threads to beat a single one.

/// Fixed cost of one additional thread relative to useful work.
pub const DEFAULT_OVERHEAD: f64 = 0.2;

/// Thread count the model considers optimal, at least `1`.
pub fn optimal_threads(collapse_factor: f64, overhead: f64) -> usize {
	if collapse_factor.is_nan() || collapse_factor >= 1.0 {
		return 1;
	}

	let threads = ((1.0 - collapse_factor) / (2.0 * overhead)).floor();
	let improvement = threads * threads * overhead + (collapse_factor - 1.0) * threads + 1.0;

	if improvement < 0.0 && threads > 1.0 && threads.is_finite() {
		threads as usize
	} else {
		1
	}
}

/// Estimated reduction ratio of the call scaled to its actual amount of work.
///
/// `(estimated_reduction * data_length) / total`; rollups and snapshot
/// restores touch fewer items than rows, which makes each item relatively
/// more expensive.
pub fn collapse_factor(estimated_reduction: f64, data_length: usize, total: usize) -> f64 {
	(estimated_reduction * data_length as f64) / total as f64
}

/// Clamps a model estimate to `[1, configured]`, and to at most one thread
/// per work item.
pub fn clamp_threads(estimate: usize, configured: usize, total: usize) -> usize {
	estimate.min(configured).min(total).max(1)
}
