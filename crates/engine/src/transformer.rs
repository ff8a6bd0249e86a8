// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{
	Dataset, DistributionDictionaries, GeneralizationHierarchy, Grouping, Projection, Snapshot, Transformation,
	TransitionStrategy,
};
use strata_type::{Error, Result};
use tracing::{debug, info, instrument, warn};

use crate::{
	TransformStats,
	config::TransformerConfig,
	driver::{Dispatch, ParallelDriver, SameThreadedDriver, TransformDriver, TransformJob},
	estimate,
	worker::{Input, RangeWorker, WorkerContext},
};

/// One transformation to apply.
#[derive(Debug, Clone)]
pub struct TransformRequest<'a> {
	pub projection: Projection,
	pub transformation: Transformation,
	pub strategy: TransitionStrategy,
	/// Grouping of a more specialized transformation, read by rollups.
	pub source: Option<&'a Grouping>,
	/// Serialized grouping, read by snapshot restores.
	pub snapshot: Option<&'a Snapshot>,
	/// Expected ratio of equivalence classes to rows, `1.0` when unknown.
	pub estimated_reduction: f64,
}

impl<'a> TransformRequest<'a> {
	pub fn new(strategy: TransitionStrategy, projection: Projection, transformation: Transformation) -> Self {
		Self {
			projection,
			transformation,
			strategy,
			source: None,
			snapshot: None,
			estimated_reduction: 1.0,
		}
	}

	pub fn full_scan(projection: Projection, transformation: Transformation) -> Self {
		Self::new(TransitionStrategy::FullScan, projection, transformation)
	}

	pub fn rollup(projection: Projection, transformation: Transformation, source: &'a Grouping) -> Self {
		Self::new(TransitionStrategy::Rollup, projection, transformation).with_source(source)
	}

	pub fn snapshot(projection: Projection, transformation: Transformation, snapshot: &'a Snapshot) -> Self {
		Self::new(TransitionStrategy::SnapshotRestore, projection, transformation).with_snapshot(snapshot)
	}

	pub fn with_source(mut self, source: &'a Grouping) -> Self {
		self.source = Some(source);
		self
	}

	pub fn with_snapshot(mut self, snapshot: &'a Snapshot) -> Self {
		self.snapshot = Some(snapshot);
		self
	}

	pub fn with_estimated_reduction(mut self, estimated_reduction: f64) -> Self {
		self.estimated_reduction = estimated_reduction;
		self
	}
}

/// Applies transformations to a dataset and groups the result into
/// equivalence classes.
///
/// Owns the dataset, its hierarchies and the distribution dictionaries
/// shared by every snapshot it produces. With more than one configured
/// thread, calls are split across a compute pool that is started on first
/// use and kept until [`Transformer::shutdown`].
pub struct Transformer {
	dataset: Dataset,
	hierarchies: Vec<GeneralizationHierarchy>,
	dictionaries: DistributionDictionaries,
	config: TransformerConfig,
	driver: Box<dyn TransformDriver>,
	stats: TransformStats,
	shut_down: bool,
}

impl Transformer {
	pub fn new(dataset: Dataset, hierarchies: Vec<GeneralizationHierarchy>, config: TransformerConfig) -> Result<Self> {
		config.validate()?;

		if hierarchies.len() != dataset.attributes() {
			return Err(Error::InvalidConfig {
				reason: format!(
					"{} hierarchies for {} attributes",
					hierarchies.len(),
					dataset.attributes()
				),
			});
		}
		if dataset.attributes() > Projection::MAX_ATTRIBUTES {
			return Err(Error::InvalidConfig {
				reason: format!(
					"at most {} attributes are supported, got {}",
					Projection::MAX_ATTRIBUTES,
					dataset.attributes()
				),
			});
		}

		let driver: Box<dyn TransformDriver> = if config.threads > 1 {
			Box::new(ParallelDriver::new(&config))
		} else {
			Box::new(SameThreadedDriver::new())
		};

		info!(
			driver = driver.name(),
			threads = config.threads,
			rows = dataset.rows(),
			attributes = dataset.attributes(),
			"transformer created"
		);

		Ok(Self {
			dataset,
			hierarchies,
			dictionaries: DistributionDictionaries::new(),
			config,
			driver,
			stats: TransformStats::default(),
			shut_down: false,
		})
	}

	/// Applies `request`, replacing the contents of `target` with the
	/// resulting equivalence classes.
	///
	/// Invalid requests are rejected before any work starts. Whenever an
	/// error is returned, `target` is left empty.
	#[instrument(name = "transform::apply", level = "trace", skip_all, fields(strategy = %request.strategy, transformation = %request.transformation))]
	pub fn apply(&mut self, request: &TransformRequest<'_>, target: &mut Grouping) -> Result<Dispatch> {
		target.clear();
		if self.shut_down {
			return Err(Error::PoolShutDown);
		}

		request.transformation.validate(request.projection, &self.hierarchies)?;
		let input = Input::resolve(request.strategy, request.source, request.snapshot)?;
		if let Input::Snapshot(snapshot) = input {
			if snapshot.sensitive_attributes() != self.dataset.sensitive_attributes() {
				return Err(Error::SnapshotShape {
					reason: format!(
						"snapshot has {} sensitive attributes, dataset has {}",
						snapshot.sensitive_attributes(),
						self.dataset.sensitive_attributes()
					),
				});
			}
		}

		let total = input.total(&self.dataset);
		let job = TransformJob {
			ctx: WorkerContext {
				dataset: &self.dataset,
				hierarchies: &self.hierarchies,
				dictionaries: &self.dictionaries,
				transformation: &request.transformation,
				input,
			},
			worker: RangeWorker::select(request.projection, self.dataset.attributes()),
			total,
			collapse_factor: estimate::collapse_factor(request.estimated_reduction, self.dataset.rows(), total),
		};

		match self.driver.apply(&job, target) {
			Ok(dispatch) => {
				self.stats.record(dispatch.threads);
				debug!(classes = target.len(), threads = dispatch.threads, "applied transformation");
				Ok(dispatch)
			}
			Err(e) => {
				target.clear();
				self.stats.record_failure();
				warn!(error = %e, "transformation failed");
				Err(e)
			}
		}
	}

	/// Serializes `grouping`, interning its distributions into this
	/// transformer's dictionaries so a later snapshot restore can read them.
	pub fn snapshot(&mut self, grouping: &Grouping) -> Result<Snapshot> {
		grouping.snapshot(self.dataset.sensitive_attributes(), &mut self.dictionaries)
	}

	/// Stops the compute pool. Further calls to [`Transformer::apply`] are
	/// refused.
	pub fn shutdown(&mut self) {
		if !self.shut_down {
			debug!(driver = self.driver.name(), "transformer shutting down");
		}
		self.driver.shutdown();
		self.shut_down = true;
	}

	pub fn is_shut_down(&self) -> bool {
		self.shut_down
	}

	pub fn stats(&self) -> TransformStats {
		self.stats
	}

	pub fn driver_name(&self) -> &str {
		self.driver.name()
	}

	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	pub fn hierarchies(&self) -> &[GeneralizationHierarchy] {
		&self.hierarchies
	}

	pub fn dictionaries(&self) -> &DistributionDictionaries {
		&self.dictionaries
	}

	pub fn config(&self) -> &TransformerConfig {
		&self.config
	}
}

impl Drop for Transformer {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn transformer(threads: usize) -> Transformer {
		let dataset = Dataset::new(vec![(0..100).map(|row| row % 4).collect()]).unwrap();
		let hierarchy = GeneralizationHierarchy::new(vec![vec![0, 0], vec![1, 0], vec![2, 1], vec![3, 1]]).unwrap();
		Transformer::new(dataset, vec![hierarchy], TransformerConfig::default().threads(threads)).unwrap()
	}

	#[test]
	fn test_driver_follows_threads() {
		assert_eq!(transformer(1).driver_name(), "same-threaded");
		assert_eq!(transformer(4).driver_name(), "parallel");
	}

	#[test]
	fn test_hierarchy_count_must_match() {
		let dataset = Dataset::new(vec![vec![0], vec![0]]).unwrap();
		let result = Transformer::new(dataset, vec![GeneralizationHierarchy::identity(1)], TransformerConfig::default());
		assert!(matches!(result, Err(Error::InvalidConfig { .. })));
	}

	#[test]
	fn test_apply_replaces_target() {
		let mut transformer = transformer(1);
		let mut target = Grouping::new();
		let request = TransformRequest::full_scan(Projection::all(1), Transformation::new([1]));

		transformer.apply(&request, &mut target).unwrap();
		transformer.apply(&request, &mut target).unwrap();
		assert_eq!(target.len(), 2);
		assert_eq!(target.total_count(), 100);
		assert_eq!(transformer.stats().calls, 2);
	}

	#[test]
	fn test_invalid_level_is_rejected_before_dispatch() {
		let mut transformer = transformer(2);
		let mut target = Grouping::new();
		let request = TransformRequest::full_scan(Projection::all(1), Transformation::new([2]));

		assert!(matches!(transformer.apply(&request, &mut target), Err(Error::LevelOutOfRange { .. })));
		assert_eq!(transformer.stats().calls, 0);
	}

	#[test]
	fn test_rejected_request_empties_previous_target() {
		let mut transformer = transformer(2);
		let mut target = Grouping::new();
		let valid = TransformRequest::full_scan(Projection::all(1), Transformation::new([0]));
		transformer.apply(&valid, &mut target).unwrap();
		assert_eq!(target.len(), 4);

		let invalid = TransformRequest::full_scan(Projection::all(1), Transformation::new([9]));
		assert!(matches!(transformer.apply(&invalid, &mut target), Err(Error::LevelOutOfRange { .. })));
		assert!(target.is_empty());

		transformer.apply(&valid, &mut target).unwrap();
		let missing = TransformRequest::new(TransitionStrategy::Rollup, Projection::all(1), Transformation::new([1]));
		assert!(matches!(transformer.apply(&missing, &mut target), Err(Error::MissingTransitionInput { .. })));
		assert!(target.is_empty());
	}

	#[test]
	fn test_mismatched_snapshot_empties_previous_target() {
		let mut transformer = transformer(1);
		let mut target = Grouping::new();
		let valid = TransformRequest::full_scan(Projection::all(1), Transformation::new([0]));
		transformer.apply(&valid, &mut target).unwrap();

		let snapshot = Snapshot::new(vec![0, 1, 1, 0, 0], Snapshot::entry_width(1)).unwrap();
		let request = TransformRequest::snapshot(Projection::all(1), Transformation::new([1]), &snapshot);
		assert!(matches!(transformer.apply(&request, &mut target), Err(Error::SnapshotShape { .. })));
		assert!(target.is_empty());
	}

	#[test]
	fn test_missing_source_is_rejected() {
		let mut transformer = transformer(1);
		let mut target = Grouping::new();
		let request = TransformRequest::new(TransitionStrategy::Rollup, Projection::all(1), Transformation::new([1]));
		assert!(matches!(transformer.apply(&request, &mut target), Err(Error::MissingTransitionInput { .. })));
	}

	#[test]
	fn test_shutdown_is_idempotent() {
		let mut transformer = transformer(3);
		let mut target = Grouping::new();
		let request = TransformRequest::full_scan(Projection::all(1), Transformation::new([0]));
		transformer.apply(&request, &mut target).unwrap();
		assert!(!target.is_empty());

		transformer.shutdown();
		transformer.shutdown();
		assert!(transformer.is_shut_down());

		assert!(matches!(transformer.apply(&request, &mut target), Err(Error::PoolShutDown)));
		assert!(target.is_empty());
	}
}
