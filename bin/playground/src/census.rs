// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Synthetic census table used by the demo.

use strata_core::{Dataset, GeneralizationHierarchy};
use strata_engine::Result;

/// `(cardinality, hierarchy height)` of each quasi-identifier: age band,
/// region and education.
const ATTRIBUTES: [(usize, usize); 3] = [(16, 5), (8, 4), (4, 3)];
const STRIDES: [usize; 3] = [7, 11, 13];
const DIAGNOSES: usize = 5;

pub struct Census {
	pub dataset: Dataset,
	pub hierarchies: Vec<GeneralizationHierarchy>,
}

/// Generates `rows` rows with one sensitive attribute. Every third row
/// falls outside the research subset.
pub fn generate(rows: usize) -> Result<Census> {
	let columns: Vec<Vec<i32>> = ATTRIBUTES
		.iter()
		.zip(STRIDES)
		.enumerate()
		.map(|(attribute, (&(cardinality, _), stride))| {
			(0..rows).map(|row| ((row * stride + attribute + row / 3) % cardinality) as i32).collect()
		})
		.collect();
	let diagnosis: Vec<i32> = (0..rows).map(|row| ((row * 3 + row / 7) % DIAGNOSES) as i32).collect();
	let subset: Vec<bool> = (0..rows).map(|row| row % 3 != 2).collect();

	let dataset = Dataset::new(columns)?.with_sensitive(vec![diagnosis])?.with_subset(subset)?;
	let hierarchies = ATTRIBUTES
		.iter()
		.map(|&(cardinality, height)| {
			// Level `l` merges values in blocks of `2^l`
			let map: Vec<Vec<i32>> = (0..cardinality)
				.map(|value| (0..height).map(|level| (value >> level) as i32).collect())
				.collect();
			GeneralizationHierarchy::new(map)
		})
		.collect::<Result<Vec<_>>>()?;

	Ok(Census {
		dataset,
		hierarchies,
	})
}
