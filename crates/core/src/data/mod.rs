// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod hierarchy;

pub use hierarchy::GeneralizationHierarchy;
use strata_type::{Error, Result};

/// Integer-coded input table, stored column by column.
///
/// `columns` are the attributes that get generalized, `sensitive` are the
/// analyzed attributes whose value frequencies are tracked per equivalence
/// class. An optional research subset marks the rows that contribute to
/// `count`; every row contributes to the population count.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
	columns: Vec<Vec<i32>>,
	sensitive: Vec<Vec<i32>>,
	subset: Option<Vec<bool>>,
	rows: usize,
}

impl Dataset {
	pub fn new(columns: Vec<Vec<i32>>) -> Result<Self> {
		let rows = columns.first().map_or(0, Vec::len);
		check_lengths(&columns, rows, 0)?;

		Ok(Self {
			columns,
			sensitive: Vec::new(),
			subset: None,
			rows,
		})
	}

	pub fn with_sensitive(mut self, sensitive: Vec<Vec<i32>>) -> Result<Self> {
		check_lengths(&sensitive, self.rows, self.columns.len())?;
		self.sensitive = sensitive;
		Ok(self)
	}

	pub fn with_subset(mut self, subset: Vec<bool>) -> Result<Self> {
		if subset.len() != self.rows {
			return Err(Error::DataShape {
				column: self.columns.len() + self.sensitive.len(),
				expected: self.rows,
				actual: subset.len(),
			});
		}
		self.subset = Some(subset);
		Ok(self)
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn attributes(&self) -> usize {
		self.columns.len()
	}

	pub fn sensitive_attributes(&self) -> usize {
		self.sensitive.len()
	}

	#[inline]
	pub fn column(&self, attribute: usize) -> &[i32] {
		&self.columns[attribute]
	}

	#[inline]
	pub fn sensitive_column(&self, attribute: usize) -> &[i32] {
		&self.sensitive[attribute]
	}

	/// Whether `row` counts toward `count` (always true without a subset).
	#[inline]
	pub fn in_subset(&self, row: usize) -> bool {
		self.subset.as_ref().map_or(true, |subset| subset[row])
	}

	pub fn check_row(&self, row: usize) -> Result<()> {
		if row < self.rows {
			Ok(())
		} else {
			Err(Error::RowOutOfRange {
				row,
				rows: self.rows,
			})
		}
	}
}

fn check_lengths(columns: &[Vec<i32>], expected: usize, offset: usize) -> Result<()> {
	for (i, column) in columns.iter().enumerate() {
		if column.len() != expected {
			return Err(Error::DataShape {
				column: offset + i,
				expected,
				actual: column.len(),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rows_and_attributes() {
		let data = Dataset::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
		assert_eq!(data.rows(), 3);
		assert_eq!(data.attributes(), 2);
		assert_eq!(data.column(1), &[4, 5, 6]);
	}

	#[test]
	fn test_ragged_columns_are_rejected() {
		let err = Dataset::new(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
		assert!(matches!(
			err,
			Error::DataShape {
				column: 1,
				expected: 3,
				actual: 2
			}
		));
	}

	#[test]
	fn test_sensitive_columns_must_match_rows() {
		let data = Dataset::new(vec![vec![1, 2]]).unwrap();
		let err = data.with_sensitive(vec![vec![0]]).unwrap_err();
		assert!(matches!(
			err,
			Error::DataShape {
				column: 1,
				..
			}
		));
	}

	#[test]
	fn test_subset_membership() {
		let data = Dataset::new(vec![vec![1, 2, 3]]).unwrap();
		assert!(data.in_subset(1));

		let data = data.with_subset(vec![true, false, true]).unwrap();
		assert!(data.in_subset(0));
		assert!(!data.in_subset(1));
	}

	#[test]
	fn test_check_row() {
		let data = Dataset::new(vec![vec![1, 2]]).unwrap();
		assert!(data.check_row(1).is_ok());
		assert!(matches!(
			data.check_row(2),
			Err(Error::RowOutOfRange {
				row: 2,
				rows: 2
			})
		));
	}
}
