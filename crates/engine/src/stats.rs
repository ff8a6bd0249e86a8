// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Counters over the lifetime of a [`Transformer`](crate::Transformer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
	/// Calls that reached dispatch.
	pub calls: u64,
	/// Calls that ran as a single inline range.
	pub inline_only: u64,
	/// Ranges handed to the pool.
	pub pooled_ranges: u64,
	/// Calls that failed after dispatch.
	pub failures: u64,
}

impl TransformStats {
	pub(crate) fn record(&mut self, threads: usize) {
		self.calls += 1;
		if threads <= 1 {
			self.inline_only += 1;
		} else {
			self.pooled_ranges += (threads - 1) as u64;
		}
	}

	pub(crate) fn record_failure(&mut self) {
		self.calls += 1;
		self.failures += 1;
	}
}
