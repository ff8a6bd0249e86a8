// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Distribution;

/// Aggregate state of one equivalence class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
	/// Smallest row index among the rows of the class.
	pub representative: usize,
	/// Rows of the class inside the research subset.
	pub count: usize,
	/// All rows of the class.
	pub population: usize,
	/// One frequency table per sensitive attribute.
	pub distributions: Vec<Distribution>,
}

impl EquivalenceClass {
	pub fn new(representative: usize, count: usize, population: usize, distributions: Vec<Distribution>) -> Self {
		Self {
			representative,
			count,
			population,
			distributions,
		}
	}

	/// Folds another partial class with the same key into this one.
	pub(crate) fn absorb(
		&mut self,
		distributions: Vec<Distribution>,
		representative: usize,
		count: usize,
		population: usize,
	) {
		self.count += count;
		self.population += population;
		self.representative = self.representative.min(representative);

		if self.distributions.is_empty() {
			self.distributions = distributions;
			return;
		}
		let mut incoming = distributions.into_iter();
		for (mine, theirs) in self.distributions.iter_mut().zip(incoming.by_ref()) {
			mine.merge(theirs);
		}
		self.distributions.extend(incoming);
	}
}
