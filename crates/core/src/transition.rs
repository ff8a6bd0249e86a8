// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};
use strata_type::{Error, Result, error::TransitionInput};

/// How the previous state feeds the next transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionStrategy {
	/// Recompute from the raw rows.
	FullScan,
	/// Coarsen the equivalence classes of a previous grouping.
	Rollup,
	/// Recompute from a serialized grouping snapshot.
	SnapshotRestore,
}

impl TransitionStrategy {
	pub const fn as_str(&self) -> &'static str {
		match self {
			TransitionStrategy::FullScan => "FULL_SCAN",
			TransitionStrategy::Rollup => "ROLLUP",
			TransitionStrategy::SnapshotRestore => "SNAPSHOT_RESTORE",
		}
	}

	/// The input this strategy reads its work items from, besides the dataset.
	pub const fn input(&self) -> Option<TransitionInput> {
		match self {
			TransitionStrategy::FullScan => None,
			TransitionStrategy::Rollup => Some(TransitionInput::SourceGrouping),
			TransitionStrategy::SnapshotRestore => Some(TransitionInput::Snapshot),
		}
	}
}

impl Display for TransitionStrategy {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<u8> for TransitionStrategy {
	type Error = Error;

	fn try_from(value: u8) -> Result<Self> {
		match value {
			0 => Ok(TransitionStrategy::FullScan),
			1 => Ok(TransitionStrategy::Rollup),
			2 => Ok(TransitionStrategy::SnapshotRestore),
			other => Err(Error::UnknownTransition {
				value: other.to_string(),
			}),
		}
	}
}

impl FromStr for TransitionStrategy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().replace('-', "_").as_str() {
			"full_scan" | "unoptimized" => Ok(TransitionStrategy::FullScan),
			"rollup" => Ok(TransitionStrategy::Rollup),
			"snapshot_restore" | "snapshot" => Ok(TransitionStrategy::SnapshotRestore),
			_ => Err(Error::UnknownTransition {
				value: s.to_string(),
			}),
		}
	}
}
