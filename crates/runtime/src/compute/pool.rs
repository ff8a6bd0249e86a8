// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use strata_type::{Error, Result};
use tracing::{debug, info};

/// Lifecycle of a [`ComputePool`].
///
/// ```text
/// Uninitialized --first scope--> Active --shutdown--> ShutDown
/// Uninitialized --shutdown-----------------------> ShutDown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
	Uninitialized,
	Active,
	ShutDown,
}

enum Inner {
	Uninitialized,
	Active(ThreadPool),
	ShutDown,
}

/// A dedicated rayon [`ThreadPool`] with an explicit lifecycle.
///
/// The pool is built lazily on the first call to [`ComputePool::in_place_scope`]
/// and torn down by [`ComputePool::shutdown`]. Once shut down it is never
/// rebuilt; further scopes are refused with [`Error::PoolShutDown`].
pub struct ComputePool {
	inner: Inner,
	workers: usize,
	name_prefix: String,
}

impl ComputePool {
	/// Creates an uninitialized pool that will run `workers` background threads.
	pub fn new(workers: usize, name_prefix: impl Into<String>) -> Self {
		Self {
			inner: Inner::Uninitialized,
			workers,
			name_prefix: name_prefix.into(),
		}
	}

	pub fn state(&self) -> PoolState {
		match self.inner {
			Inner::Uninitialized => PoolState::Uninitialized,
			Inner::Active(_) => PoolState::Active,
			Inner::ShutDown => PoolState::ShutDown,
		}
	}

	/// Runs `op` on the calling thread with a scope whose spawned tasks run
	/// on the pool's background threads.
	///
	/// Tasks spawned into the scope may borrow anything that outlives the
	/// call; the call returns once every spawned task has completed. A panic
	/// in a spawned task is re-raised on the calling thread.
	pub fn in_place_scope<'scope, OP, R>(&mut self, op: OP) -> Result<R>
	where
		OP: FnOnce(&Scope<'scope>) -> R,
	{
		let pool = self.activate()?;
		Ok(pool.in_place_scope(op))
	}

	/// Releases the background threads. Safe to call repeatedly, and when the
	/// pool was never built.
	pub fn shutdown(&mut self) {
		match std::mem::replace(&mut self.inner, Inner::ShutDown) {
			Inner::Active(pool) => {
				drop(pool);
				info!(prefix = %self.name_prefix, "compute pool shut down");
			}
			Inner::Uninitialized => debug!(prefix = %self.name_prefix, "compute pool shut down before use"),
			Inner::ShutDown => {}
		}
	}

	fn activate(&mut self) -> Result<&ThreadPool> {
		if let Inner::Uninitialized = self.inner {
			if self.workers == 0 {
				return Err(Error::PoolBuild {
					reason: "a compute pool needs at least one worker".to_string(),
				});
			}

			let prefix = self.name_prefix.clone();
			let pool = ThreadPoolBuilder::new()
				.num_threads(self.workers)
				.thread_name(move |i| format!("{prefix}-{i}"))
				.build()
				.map_err(|e| Error::PoolBuild {
					reason: e.to_string(),
				})?;

			info!(prefix = %self.name_prefix, workers = self.workers, "compute pool started");
			self.inner = Inner::Active(pool);
		}

		match &self.inner {
			Inner::Active(pool) => Ok(pool),
			Inner::Uninitialized | Inner::ShutDown => Err(Error::PoolShutDown),
		}
	}
}

impl Drop for ComputePool {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::atomic::{AtomicUsize, Ordering},
		thread,
	};

	use super::*;

	#[test]
	fn test_lazy_activation() {
		let mut pool = ComputePool::new(2, "test");
		assert_eq!(pool.state(), PoolState::Uninitialized);

		let value = pool.in_place_scope(|_| 7).unwrap();
		assert_eq!(value, 7);
		assert_eq!(pool.state(), PoolState::Active);
	}

	#[test]
	fn test_scope_body_runs_on_calling_thread() {
		let mut pool = ComputePool::new(1, "test");
		let caller = thread::current().id();
		let body = pool.in_place_scope(|_| thread::current().id()).unwrap();
		assert_eq!(body, caller);
	}

	#[test]
	fn test_spawned_tasks_complete_before_return() {
		let mut pool = ComputePool::new(3, "test");
		let counter = AtomicUsize::new(0);

		pool.in_place_scope(|scope| {
			for _ in 0..8 {
				scope.spawn(|_| {
					counter.fetch_add(1, Ordering::Relaxed);
				});
			}
		})
		.unwrap();

		assert_eq!(counter.load(Ordering::Relaxed), 8);
	}

	#[test]
	fn test_spawned_tasks_run_on_named_threads() {
		let mut pool = ComputePool::new(1, "transform");
		let (tx, rx) = std::sync::mpsc::channel();

		pool.in_place_scope(|scope| {
			scope.spawn(move |_| {
				tx.send(thread::current().name().map(str::to_string)).unwrap();
			});
		})
		.unwrap();

		assert_eq!(rx.recv().unwrap().as_deref(), Some("transform-0"));
	}

	#[test]
	fn test_shutdown_is_idempotent() {
		let mut pool = ComputePool::new(2, "test");
		pool.in_place_scope(|_| ()).unwrap();

		pool.shutdown();
		pool.shutdown();
		assert_eq!(pool.state(), PoolState::ShutDown);
	}

	#[test]
	fn test_shutdown_without_pool_is_noop() {
		let mut pool = ComputePool::new(2, "test");
		pool.shutdown();
		assert_eq!(pool.state(), PoolState::ShutDown);
	}

	#[test]
	fn test_scope_after_shutdown_is_refused() {
		let mut pool = ComputePool::new(2, "test");
		pool.shutdown();
		assert!(matches!(pool.in_place_scope(|_| ()), Err(Error::PoolShutDown)));
		assert_eq!(pool.state(), PoolState::ShutDown);
	}

	#[test]
	fn test_zero_workers_is_rejected() {
		let mut pool = ComputePool::new(0, "test");
		assert!(matches!(pool.in_place_scope(|_| ()), Err(Error::PoolBuild { .. })));
	}
}
