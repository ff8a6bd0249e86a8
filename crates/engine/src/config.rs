// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::grouping::DEFAULT_CAPACITY;
use strata_type::{Error, Result};

use crate::estimate::DEFAULT_OVERHEAD;

/// Upper bound for [`TransformerConfig::threads`].
pub const MAX_THREADS: usize = 64;

/// Configuration for a [`Transformer`](crate::Transformer).
#[derive(Debug, Clone)]
pub struct TransformerConfig {
	/// Maximum number of threads per call, including the calling thread.
	pub threads: usize,
	/// Per-thread overhead of the cost model.
	pub overhead: f64,
	/// Initial capacity of worker-local groupings, split across the slots.
	pub initial_grouping_capacity: usize,
	/// Name prefix of the pool's background threads.
	pub thread_name_prefix: String,
}

impl Default for TransformerConfig {
	fn default() -> Self {
		Self {
			threads: 1,
			overhead: DEFAULT_OVERHEAD,
			initial_grouping_capacity: DEFAULT_CAPACITY,
			thread_name_prefix: "transform".to_string(),
		}
	}
}

impl TransformerConfig {
	/// Uses one thread per logical CPU.
	pub fn with_available_parallelism() -> Self {
		Self::default().threads(num_cpus::get().min(MAX_THREADS))
	}

	pub fn threads(mut self, threads: usize) -> Self {
		self.threads = threads;
		self
	}

	pub fn overhead(mut self, overhead: f64) -> Self {
		self.overhead = overhead;
		self
	}

	pub fn initial_grouping_capacity(mut self, capacity: usize) -> Self {
		self.initial_grouping_capacity = capacity;
		self
	}

	pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.thread_name_prefix = prefix.into();
		self
	}

	/// Initial capacity of one worker-local grouping.
	pub fn slot_capacity(&self) -> usize {
		self.initial_grouping_capacity / self.threads.max(1)
	}

	pub fn validate(&self) -> Result<()> {
		if self.threads == 0 {
			return Err(Error::InvalidConfig {
				reason: "threads must be at least 1".to_string(),
			});
		}
		if self.threads > MAX_THREADS {
			return Err(Error::InvalidConfig {
				reason: format!("threads must be at most {MAX_THREADS}, got {}", self.threads),
			});
		}
		if !self.overhead.is_finite() || self.overhead <= 0.0 {
			return Err(Error::InvalidConfig {
				reason: format!("overhead must be a positive number, got {}", self.overhead),
			});
		}
		Ok(())
	}
}
