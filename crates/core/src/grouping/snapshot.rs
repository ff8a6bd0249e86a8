// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Error, Result};

use crate::{Distribution, DistributionDictionaries};

const REPRESENTATIVE: usize = 0;
const COUNT: usize = 1;
const POPULATION: usize = 2;
const HEADER: usize = 3;

/// Serialized grouping state.
///
/// A flat buffer of fixed-width entries. Each entry is laid out as
///
/// ```text
/// [representative, count, population, (values id, frequencies id) per sensitive attribute]
/// ```
///
/// where the ids point into a [`DistributionDictionaries`] pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	data: Vec<i32>,
	width: usize,
}

impl Snapshot {
	pub fn new(data: Vec<i32>, width: usize) -> Result<Self> {
		if width < HEADER || (width - HEADER) % 2 != 0 {
			return Err(Error::SnapshotShape {
				reason: format!("entry width {width} is not 3 + 2 * sensitive attributes"),
			});
		}
		if data.len() % width != 0 {
			return Err(Error::SnapshotShape {
				reason: format!("buffer of {} cells is not a multiple of entry width {width}", data.len()),
			});
		}
		Ok(Self {
			data,
			width,
		})
	}

	/// Entry width for a dataset with `sensitive_attributes` analyzed columns.
	pub const fn entry_width(sensitive_attributes: usize) -> usize {
		HEADER + 2 * sensitive_attributes
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn data(&self) -> &[i32] {
		&self.data
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.data.len() / self.width
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn sensitive_attributes(&self) -> usize {
		(self.width - HEADER) / 2
	}

	pub fn entry(&self, index: usize) -> SnapshotEntry<'_> {
		let offset = index * self.width;
		SnapshotEntry {
			cells: &self.data[offset..offset + self.width],
		}
	}
}

/// Borrowed view of one snapshot entry.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotEntry<'a> {
	cells: &'a [i32],
}

impl SnapshotEntry<'_> {
	pub fn representative(&self) -> Result<usize> {
		self.non_negative(REPRESENTATIVE, "representative")
	}

	pub fn count(&self) -> Result<usize> {
		self.non_negative(COUNT, "count")
	}

	pub fn population(&self) -> Result<usize> {
		self.non_negative(POPULATION, "population")
	}

	/// Resolves the entry's distributions through `dictionaries`.
	pub fn distributions(&self, dictionaries: &DistributionDictionaries) -> Result<Vec<Distribution>> {
		self.cells[HEADER..]
			.chunks_exact(2)
			.map(|ids| {
				let values = dictionaries.values.get(ids[0])?;
				let frequencies = dictionaries.frequencies.get(ids[1])?;
				Distribution::unpack(values, frequencies)
			})
			.collect()
	}

	fn non_negative(&self, cell: usize, name: &str) -> Result<usize> {
		let value = self.cells[cell];
		usize::try_from(value).map_err(|_| Error::SnapshotShape {
			reason: format!("negative {name} {value}"),
		})
	}
}
