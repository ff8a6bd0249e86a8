// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Error, Result};

/// Lookup table from `(raw value, level)` to a generalized value.
///
/// Raw values are dense integer codes `0..len()`; every raw value has one
/// entry per level, level `0` usually being the raw value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralizationHierarchy {
	map: Vec<Vec<i32>>,
	height: usize,
}

impl GeneralizationHierarchy {
	pub fn new(map: Vec<Vec<i32>>) -> Result<Self> {
		let height = match map.first() {
			Some(first) if !first.is_empty() => first.len(),
			_ => {
				return Err(Error::Hierarchy {
					reason: "hierarchy has no levels".to_string(),
				});
			}
		};

		if let Some(value) = map.iter().position(|levels| levels.len() != height) {
			return Err(Error::Hierarchy {
				reason: format!(
					"value {value} has {} levels, expected {height}",
					map[value].len()
				),
			});
		}

		Ok(Self {
			map,
			height,
		})
	}

	/// A single-level hierarchy mapping each of `values` codes to itself.
	pub fn identity(values: usize) -> Self {
		Self {
			map: (0..values as i32).map(|v| vec![v]).collect(),
			height: 1,
		}
	}

	/// Number of levels, including the ungeneralized level `0`.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Number of raw values covered.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	#[inline]
	pub fn get(&self, value: i32, level: u8) -> Option<i32> {
		let levels = self.map.get(usize::try_from(value).ok()?)?;
		levels.get(level as usize).copied()
	}

	/// Generalizes `value` of `attribute` to `level`.
	#[inline]
	pub fn generalize(&self, attribute: usize, value: i32, level: u8) -> Result<i32> {
		if level as usize >= self.height {
			return Err(Error::LevelOutOfRange {
				attribute,
				level,
				height: self.height,
			});
		}
		self.get(value, level).ok_or(Error::ValueOutOfHierarchy {
			attribute,
			value,
		})
	}
}
