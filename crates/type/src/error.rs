// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

/// Which input a transition strategy reads its work items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionInput {
	SourceGrouping,
	Snapshot,
}

impl Display for TransitionInput {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			TransitionInput::SourceGrouping => f.write_str("source grouping"),
			TransitionInput::Snapshot => f.write_str("snapshot"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown transition type: {value}")]
	UnknownTransition {
		value: String,
	},

	#[error("transition {strategy} requires a {input}")]
	MissingTransitionInput {
		strategy: &'static str,
		input: TransitionInput,
	},

	#[error("column {column} has {actual} rows, expected {expected}")]
	DataShape {
		column: usize,
		expected: usize,
		actual: usize,
	},

	#[error("invalid generalization hierarchy: {reason}")]
	Hierarchy {
		reason: String,
	},

	#[error("value {value} is not covered by the hierarchy of attribute {attribute}")]
	ValueOutOfHierarchy {
		attribute: usize,
		value: i32,
	},

	#[error("level {level} exceeds the height {height} of the hierarchy of attribute {attribute}")]
	LevelOutOfRange {
		attribute: usize,
		level: u8,
		height: usize,
	},

	#[error("transformation has {actual} levels, dataset has {expected} attributes")]
	TransformationArity {
		expected: usize,
		actual: usize,
	},

	#[error("projection selects attribute {attribute}, dataset has {attributes} attributes")]
	ProjectionOutOfRange {
		attribute: usize,
		attributes: usize,
	},

	#[error("row {row} is out of range, dataset has {rows} rows")]
	RowOutOfRange {
		row: usize,
		rows: usize,
	},

	#[error("dictionary has no entry with id {id}")]
	UnknownDictionaryId {
		id: i32,
	},

	#[error("malformed snapshot: {reason}")]
	SnapshotShape {
		reason: String,
	},

	#[error("error transforming data")]
	Transform {
		#[source]
		source: Box<Error>,
	},

	#[error("worker panicked: {message}")]
	WorkerPanicked {
		message: String,
	},

	#[error("failed to build compute pool: {reason}")]
	PoolBuild {
		reason: String,
	},

	#[error("compute pool has been shut down")]
	PoolShutDown,

	#[error("invalid configuration: {reason}")]
	InvalidConfig {
		reason: String,
	},
}

impl Error {
	/// Wraps a fault raised while a range was being transformed.
	pub fn transform(source: Error) -> Self {
		match source {
			already @ Error::Transform {
				..
			} => already,
			other => Error::Transform {
				source: Box::new(other),
			},
		}
	}
}
