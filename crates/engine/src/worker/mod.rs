// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-range transformation.
//!
//! A [`RangeWorker`] turns one contiguous range of work items into
//! equivalence classes of a grouping it exclusively owns for the duration of
//! the range. Everything else it reads, bundled in a [`WorkerContext`], is
//! shared immutably between all ranges of a call.

mod range;

pub use range::RangeWorker;
use strata_core::{
	Dataset, DistributionDictionaries, GeneralizationHierarchy, Grouping, Snapshot, Transformation,
	TransitionStrategy,
};
use strata_type::{Error, Result, error::TransitionInput};

use crate::classify;

/// What the work items of a call are.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
	/// Raw dataset rows.
	Rows,
	/// Equivalence classes of a previous, more specialized grouping.
	Classes(&'a Grouping),
	/// Entries of a serialized grouping.
	Snapshot(&'a Snapshot),
}

impl<'a> Input<'a> {
	/// Picks the input `strategy` reads from, failing if it was not supplied.
	pub fn resolve(
		strategy: TransitionStrategy,
		source: Option<&'a Grouping>,
		snapshot: Option<&'a Snapshot>,
	) -> Result<Self> {
		let Some(required) = strategy.input() else {
			return Ok(Input::Rows);
		};
		let input = match required {
			TransitionInput::SourceGrouping => source.map(Input::Classes),
			TransitionInput::Snapshot => snapshot.map(Input::Snapshot),
		};
		input.ok_or(Error::MissingTransitionInput {
			strategy: strategy.as_str(),
			input: required,
		})
	}

	pub fn strategy(&self) -> TransitionStrategy {
		match self {
			Input::Rows => TransitionStrategy::FullScan,
			Input::Classes(_) => TransitionStrategy::Rollup,
			Input::Snapshot(_) => TransitionStrategy::SnapshotRestore,
		}
	}

	/// Number of work items over `dataset`.
	pub fn total(&self, dataset: &Dataset) -> usize {
		let (source, snapshot_length, width) = match self {
			Input::Rows => (0, 0, 0),
			Input::Classes(source) => (source.len(), 0, 0),
			Input::Snapshot(snapshot) => (0, snapshot.data().len(), snapshot.width()),
		};
		classify::total(self.strategy(), dataset.rows(), source, snapshot_length, width)
	}
}

/// Read-only state shared by every range of one call.
#[derive(Debug, Clone, Copy)]
pub struct WorkerContext<'a> {
	pub dataset: &'a Dataset,
	pub hierarchies: &'a [GeneralizationHierarchy],
	pub dictionaries: &'a DistributionDictionaries,
	pub transformation: &'a Transformation,
	pub input: Input<'a>,
}

impl WorkerContext<'_> {
	/// Generalized value of `attribute` in `row`.
	#[inline]
	pub fn generalize(&self, attribute: usize, row: usize) -> Result<i32> {
		let value = self.dataset.column(attribute)[row];
		self.hierarchies[attribute].generalize(attribute, value, self.transformation.level(attribute))
	}
}
