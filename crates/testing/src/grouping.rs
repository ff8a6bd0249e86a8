// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Order-independent views of groupings and a brute-force reference.

use std::collections::BTreeMap;

use strata_core::{
	Dataset, Distribution, EquivalenceClass, GeneralizationHierarchy, Grouping, Projection, Transformation,
};

/// Classes keyed by their generalized values.
pub type ClassMap = BTreeMap<Vec<i32>, EquivalenceClass>;

pub fn class_map(grouping: &Grouping) -> ClassMap {
	grouping.ordered().map(|(key, class)| (key.values().to_vec(), class.clone())).collect()
}

/// Groups `dataset` row by row without any of the engine's machinery.
///
/// Keys hold the active attributes in ascending order.
pub fn reference(
	dataset: &Dataset,
	hierarchies: &[GeneralizationHierarchy],
	projection: Projection,
	transformation: &Transformation,
) -> ClassMap {
	let mut classes = ClassMap::new();

	for row in 0..dataset.rows() {
		let key: Vec<i32> = projection
			.iter()
			.map(|attribute| {
				let value = dataset.column(attribute)[row];
				match hierarchies[attribute].get(value, transformation.level(attribute)) {
					Some(generalized) => generalized,
					None => panic!("value {value} of attribute {attribute} has no generalization"),
				}
			})
			.collect();

		let counted = dataset.in_subset(row);
		let class = classes.entry(key).or_insert_with(|| EquivalenceClass::new(row, 0, 0, Vec::new()));
		class.population += 1;
		if counted {
			class.count += 1;
			if class.distributions.is_empty() {
				class.distributions = vec![Distribution::new(); dataset.sensitive_attributes()];
			}
			for (attribute, distribution) in class.distributions.iter_mut().enumerate() {
				distribution.add(dataset.sensitive_column(attribute)[row], 1);
			}
		}
	}

	classes
}

/// Asserts both groupings hold the same classes, ignoring insertion order.
pub fn assert_same_classes(left: &Grouping, right: &Grouping) {
	assert_eq!(class_map(left), class_map(right));
}

/// Asserts that `grouping` accounts for every row exactly once.
pub fn assert_conserved(grouping: &Grouping, dataset: &Dataset) {
	let counted = (0..dataset.rows()).filter(|row| dataset.in_subset(*row)).count();
	assert_eq!(grouping.total_population(), dataset.rows(), "population");
	assert_eq!(grouping.total_count(), counted, "count");

	// Each counted row contributes one sensitive value per attribute
	for (key, class) in grouping.ordered() {
		for (attribute, distribution) in class.distributions.iter().enumerate() {
			assert_eq!(
				distribution.total(),
				class.count,
				"distribution {attribute} of class {:?}",
				key.values()
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixture::Fixture;

	#[test]
	fn test_reference_conserves_rows() {
		let fixture = Fixture::census_with_subset(300);
		let classes = reference(&fixture.dataset, &fixture.hierarchies, fixture.all(), &fixture.uniform(2));

		let population: usize = classes.values().map(|class| class.population).sum();
		let count: usize = classes.values().map(|class| class.count).sum();
		assert_eq!(population, 300);
		assert_eq!(count, 200);
	}

	#[test]
	fn test_reference_representatives_are_first_rows() {
		let fixture = Fixture::census(50);
		let classes = reference(&fixture.dataset, &fixture.hierarchies, Projection::none(), &fixture.uniform(0));
		assert_eq!(classes.len(), 1);
		assert_eq!(classes.values().next().unwrap().representative, 0);
	}
}
