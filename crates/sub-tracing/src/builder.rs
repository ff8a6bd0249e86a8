// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::error::Error;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Builder for the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	json: bool,
	with_target: bool,
	with_thread_names: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			level: Level::INFO,
			json: false,
			with_target: true,
			with_thread_names: false,
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// Emit one JSON object per event instead of human readable lines.
	pub fn json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	/// Include the thread name, e.g. `transform-0`, in every event.
	pub fn with_thread_names(mut self, with_thread_names: bool) -> Self {
		self.with_thread_names = with_thread_names;
		self
	}

	pub fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
	}

	/// Installs the subscriber. Fails if a global subscriber is already set.
	pub fn try_init(self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
		let builder = tracing_subscriber::fmt()
			.with_env_filter(self.env_filter())
			.with_target(self.with_target)
			.with_thread_names(self.with_thread_names);

		if self.json {
			builder.json().try_init()
		} else {
			builder.try_init()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_second_init_fails() {
		let first = TracingBuilder::new().level(Level::DEBUG).try_init();
		assert!(first.is_ok());
		assert!(TracingBuilder::new().json(true).try_init().is_err());
	}
}
