// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexSet;
use strata_type::{Error, Result};

/// Interns integer arrays and hands out dense ids for them.
///
/// Equal arrays always receive the same id; ids are assigned in first-seen
/// order starting at `0`.
#[derive(Debug, Clone, Default)]
pub struct IntArrayDictionary {
	arrays: IndexSet<Box<[i32]>>,
}

impl IntArrayDictionary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the id of `array`, inserting it if unseen.
	pub fn probe(&mut self, array: &[i32]) -> Result<i32> {
		let index = match self.arrays.get_index_of(array) {
			Some(index) => index,
			None => self.arrays.insert_full(array.into()).0,
		};
		i32::try_from(index).map_err(|_| Error::SnapshotShape {
			reason: format!("dictionary id {index} does not fit a snapshot cell"),
		})
	}

	pub fn get(&self, id: i32) -> Result<&[i32]> {
		usize::try_from(id)
			.ok()
			.and_then(|index| self.arrays.get_index(index))
			.map(|array| &**array)
			.ok_or(Error::UnknownDictionaryId {
				id,
			})
	}

	pub fn len(&self) -> usize {
		self.arrays.len()
	}

	pub fn is_empty(&self) -> bool {
		self.arrays.is_empty()
	}
}

/// The pair of dictionaries that encode packed distributions: one for the
/// value arrays, one for the frequency arrays.
#[derive(Debug, Clone, Default)]
pub struct DistributionDictionaries {
	pub values: IntArrayDictionary,
	pub frequencies: IntArrayDictionary,
}

impl DistributionDictionaries {
	pub fn new() -> Self {
		Self::default()
	}
}
