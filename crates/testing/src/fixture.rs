// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{Dataset, GeneralizationHierarchy, Projection, Transformation};

const STRIDES: [usize; 8] = [7, 11, 13, 17, 19, 23, 29, 31];

/// Hierarchy over `values` codes where level `l` maps `v` to `v >> l`.
pub fn halving_hierarchy(values: usize, height: usize) -> GeneralizationHierarchy {
	let map = (0..values).map(|value| (0..height).map(|level| (value >> level) as i32).collect()).collect();
	match GeneralizationHierarchy::new(map) {
		Ok(hierarchy) => hierarchy,
		Err(e) => panic!("invalid fixture hierarchy: {e}"),
	}
}

/// Quasi-identifying column `attribute` with codes `0..cardinality`.
pub fn column(rows: usize, attribute: usize, cardinality: usize) -> Vec<i32> {
	let stride = STRIDES[attribute % STRIDES.len()];
	(0..rows).map(|row| ((row * stride + attribute + row / 3) % cardinality) as i32).collect()
}

/// Sensitive column with five distinct values.
pub fn sensitive_column(rows: usize, attribute: usize) -> Vec<i32> {
	(0..rows).map(|row| ((row * 3 + attribute * 2 + row / 7) % 5) as i32).collect()
}

/// Every third row falls outside the research subset.
pub fn subset(rows: usize) -> Vec<bool> {
	(0..rows).map(|row| row % 3 != 2).collect()
}

/// A generated table together with the hierarchies of its columns.
pub struct Fixture {
	pub dataset: Dataset,
	pub hierarchies: Vec<GeneralizationHierarchy>,
}

impl Fixture {
	/// Three quasi-identifiers with 16, 8 and 4 codes and one sensitive
	/// attribute.
	pub fn census(rows: usize) -> Self {
		Self::generate(rows, &[(16, 5), (8, 4), (4, 3)], 1, false)
	}

	/// Like [`Fixture::census`], with a research subset.
	pub fn census_with_subset(rows: usize) -> Self {
		Self::generate(rows, &[(16, 5), (8, 4), (4, 3)], 1, true)
	}

	/// `attributes` holds `(cardinality, hierarchy height)` per column.
	pub fn generate(rows: usize, attributes: &[(usize, usize)], sensitive: usize, with_subset: bool) -> Self {
		let columns = attributes
			.iter()
			.enumerate()
			.map(|(attribute, (cardinality, _))| column(rows, attribute, *cardinality))
			.collect();
		let hierarchies =
			attributes.iter().map(|(cardinality, height)| halving_hierarchy(*cardinality, *height)).collect();
		let sensitive = (0..sensitive).map(|attribute| sensitive_column(rows, attribute)).collect();

		let dataset = Dataset::new(columns).and_then(|dataset| dataset.with_sensitive(sensitive));
		let dataset = if with_subset {
			dataset.and_then(|dataset| dataset.with_subset(subset(rows)))
		} else {
			dataset
		};

		match dataset {
			Ok(dataset) => Self {
				dataset,
				hierarchies,
			},
			Err(e) => panic!("invalid fixture dataset: {e}"),
		}
	}

	pub fn all(&self) -> Projection {
		Projection::all(self.dataset.attributes())
	}

	/// Transformation with every attribute at `level`, capped at the top of
	/// its hierarchy.
	pub fn uniform(&self, level: u8) -> Transformation {
		Transformation::new(
			self.hierarchies.iter().map(|hierarchy| level.min(hierarchy.height().saturating_sub(1) as u8)),
		)
	}
}
