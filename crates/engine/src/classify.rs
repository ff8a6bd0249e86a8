// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Number of work items of a transition.

use strata_core::TransitionStrategy;

/// Work items for one call: one per raw row, per previous equivalence class
/// or per snapshot entry, depending on `strategy`.
pub fn total(
	strategy: TransitionStrategy,
	data_length: usize,
	source_grouping_size: usize,
	snapshot_length: usize,
	snapshot_entry_width: usize,
) -> usize {
	match strategy {
		TransitionStrategy::FullScan => data_length,
		TransitionStrategy::Rollup => source_grouping_size,
		TransitionStrategy::SnapshotRestore => snapshot_length.checked_div(snapshot_entry_width).unwrap_or(0),
	}
}
