// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Frequency tables over sensitive values, and the dictionaries that store
//! them compactly inside snapshots.

mod dictionary;

use std::collections::{BTreeMap, btree_map};

pub use dictionary::{DistributionDictionaries, IntArrayDictionary};
use strata_type::{Error, Result};

/// Frequencies of the values of one sensitive attribute inside one
/// equivalence class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
	frequencies: BTreeMap<i32, usize>,
}

impl Distribution {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn singleton(value: i32) -> Self {
		let mut distribution = Self::new();
		distribution.add(value, 1);
		distribution
	}

	#[inline]
	pub fn add(&mut self, value: i32, frequency: usize) {
		if frequency > 0 {
			*self.frequencies.entry(value).or_insert(0) += frequency;
		}
	}

	/// Adds every frequency of `other` to this distribution.
	pub fn merge(&mut self, other: Distribution) {
		if self.frequencies.is_empty() {
			self.frequencies = other.frequencies;
			return;
		}
		for (value, frequency) in other.frequencies {
			self.add(value, frequency);
		}
	}

	pub fn frequency(&self, value: i32) -> usize {
		self.frequencies.get(&value).copied().unwrap_or(0)
	}

	/// Sum of all frequencies.
	pub fn total(&self) -> usize {
		self.frequencies.values().sum()
	}

	/// Number of distinct values.
	pub fn len(&self) -> usize {
		self.frequencies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frequencies.is_empty()
	}

	/// `(value, frequency)` pairs in ascending value order.
	pub fn iter(&self) -> btree_map::Iter<'_, i32, usize> {
		self.frequencies.iter()
	}

	/// Splits the table into parallel `values` and `frequencies` arrays,
	/// ordered by value.
	pub fn pack(&self) -> Result<(Vec<i32>, Vec<i32>)> {
		let mut values = Vec::with_capacity(self.len());
		let mut frequencies = Vec::with_capacity(self.len());
		for (&value, &frequency) in self.iter() {
			values.push(value);
			frequencies.push(i32::try_from(frequency).map_err(|_| Error::SnapshotShape {
				reason: format!("frequency {frequency} of value {value} does not fit a snapshot cell"),
			})?);
		}
		Ok((values, frequencies))
	}

	/// Inverse of [`Distribution::pack`].
	pub fn unpack(values: &[i32], frequencies: &[i32]) -> Result<Self> {
		if values.len() != frequencies.len() {
			return Err(Error::SnapshotShape {
				reason: format!(
					"distribution has {} values but {} frequencies",
					values.len(),
					frequencies.len()
				),
			});
		}

		let mut distribution = Self::new();
		for (&value, &frequency) in values.iter().zip(frequencies) {
			let frequency = usize::try_from(frequency).map_err(|_| Error::SnapshotShape {
				reason: format!("negative frequency {frequency} for value {value}"),
			})?;
			distribution.add(value, frequency);
		}
		Ok(distribution)
	}
}
