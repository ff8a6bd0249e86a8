// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hash-indexed equivalence-class container.
//!
//! Classes are kept in an [`IndexMap`], so besides the hash index they can be
//! enumerated in insertion order. Merging and snapshotting walk that order and
//! never depend on the hash layout.

mod class;
mod key;
mod snapshot;

pub use class::EquivalenceClass;
use indexmap::{IndexMap, map::Entry};
pub use key::{ClassKey, KeyValues};
pub use snapshot::{Snapshot, SnapshotEntry};
use strata_runtime::hash::{BuildIdentityHasher, Hash64};
use strata_type::{Error, Result};

use crate::{Distribution, DistributionDictionaries};

pub const DEFAULT_CAPACITY: usize = 1024;

/// Equivalence classes of one transformation.
#[derive(Debug, Clone)]
pub struct Grouping {
	classes: IndexMap<ClassKey, EquivalenceClass, BuildIdentityHasher>,
	capacity: usize,
}

impl Default for Grouping {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}
}

impl Grouping {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			classes: IndexMap::with_capacity_and_hasher(capacity, BuildIdentityHasher::default()),
			capacity,
		}
	}

	/// Number of equivalence classes.
	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	/// Adds a partial equivalence class.
	///
	/// Creates the class if `key` is unseen. Otherwise counts and populations
	/// are added, distributions are combined per sensitive attribute and the
	/// smaller representative row is kept.
	pub fn absorb(
		&mut self,
		hash: Hash64,
		key: KeyValues,
		distributions: Vec<Distribution>,
		representative: usize,
		count: usize,
		population: usize,
	) {
		match self.classes.entry(ClassKey::with_hash(hash, key)) {
			Entry::Occupied(mut entry) => {
				entry.get_mut().absorb(distributions, representative, count, population);
			}
			Entry::Vacant(entry) => {
				entry.insert(EquivalenceClass::new(representative, count, population, distributions));
			}
		}
	}

	pub fn get(&self, values: &[i32]) -> Option<&EquivalenceClass> {
		self.classes.get(&ClassKey::from_slice(values))
	}

	pub fn get_index(&self, index: usize) -> Option<(&ClassKey, &EquivalenceClass)> {
		self.classes.get_index(index)
	}

	/// Classes in insertion order.
	pub fn ordered(&self) -> indexmap::map::Iter<'_, ClassKey, EquivalenceClass> {
		self.classes.iter()
	}

	/// Moves every class out in insertion order and releases the container's
	/// state, leaving it empty and ready for reuse.
	pub fn drain_ordered(&mut self) -> Vec<(ClassKey, EquivalenceClass)> {
		let drained: Vec<_> = self.classes.drain(..).collect();
		self.clear();
		drained
	}

	/// Drops every class and shrinks back to the initial capacity.
	pub fn clear(&mut self) {
		self.classes.clear();
		self.classes.shrink_to(self.capacity);
	}

	/// Sum of `count` over all classes.
	pub fn total_count(&self) -> usize {
		self.classes.values().map(|class| class.count).sum()
	}

	/// Sum of `population` over all classes.
	pub fn total_population(&self) -> usize {
		self.classes.values().map(|class| class.population).sum()
	}

	/// Serializes the classes, in insertion order, into a [`Snapshot`]. Packed
	/// distributions are interned into `dictionaries`.
	pub fn snapshot(
		&self,
		sensitive_attributes: usize,
		dictionaries: &mut DistributionDictionaries,
	) -> Result<Snapshot> {
		let width = Snapshot::entry_width(sensitive_attributes);
		let mut data = Vec::with_capacity(self.classes.len() * width);

		for class in self.classes.values() {
			data.push(cell(class.representative, "representative")?);
			data.push(cell(class.count, "count")?);
			data.push(cell(class.population, "population")?);

			for attribute in 0..sensitive_attributes {
				let (values, frequencies) = match class.distributions.get(attribute) {
					Some(distribution) => distribution.pack()?,
					None => (Vec::new(), Vec::new()),
				};
				data.push(dictionaries.values.probe(&values)?);
				data.push(dictionaries.frequencies.probe(&frequencies)?);
			}
		}

		Snapshot::new(data, width)
	}
}

fn cell(value: usize, name: &str) -> Result<i32> {
	i32::try_from(value).map_err(|_| Error::SnapshotShape {
		reason: format!("{name} {value} does not fit a snapshot cell"),
	})
}

#[cfg(test)]
mod tests {
	use smallvec::smallvec;

	use super::*;

	fn absorb(grouping: &mut Grouping, values: &[i32], representative: usize, count: usize, population: usize) {
		let key = ClassKey::from_slice(values);
		let (hash, values) = key.into_parts();
		grouping.absorb(hash, values, vec![], representative, count, population);
	}

	#[test]
	fn test_absorb_creates_and_merges() {
		let mut grouping = Grouping::new();
		absorb(&mut grouping, &[1, 2], 4, 1, 1);
		absorb(&mut grouping, &[3, 4], 5, 1, 1);
		absorb(&mut grouping, &[1, 2], 9, 2, 3);

		assert_eq!(grouping.len(), 2);
		let class = grouping.get(&[1, 2]).unwrap();
		assert_eq!(class.count, 3);
		assert_eq!(class.population, 4);
		assert_eq!(class.representative, 4);
	}

	#[test]
	fn test_representative_is_smallest_row() {
		let mut grouping = Grouping::new();
		absorb(&mut grouping, &[0], 17, 1, 1);
		absorb(&mut grouping, &[0], 3, 1, 1);
		absorb(&mut grouping, &[0], 8, 1, 1);
		assert_eq!(grouping.get(&[0]).unwrap().representative, 3);
	}

	#[test]
	fn test_ordered_is_insertion_order() {
		let mut grouping = Grouping::new();
		for value in [5, 1, 9, 1, 3] {
			absorb(&mut grouping, &[value], 0, 1, 1);
		}
		let keys: Vec<i32> = grouping.ordered().map(|(key, _)| key.values()[0]).collect();
		assert_eq!(keys, vec![5, 1, 9, 3]);
	}

	#[test]
	fn test_drain_ordered_releases_state() {
		let mut grouping = Grouping::with_capacity(4);
		for value in 0..100 {
			absorb(&mut grouping, &[value], value as usize, 1, 1);
		}

		let drained = grouping.drain_ordered();
		assert_eq!(drained.len(), 100);
		assert_eq!(drained[0].0.values(), &[0]);
		assert_eq!(drained[99].0.values(), &[99]);
		assert!(grouping.is_empty());
		assert_eq!(grouping.total_count(), 0);
	}

	#[test]
	fn test_distributions_are_combined() {
		let mut grouping = Grouping::new();
		let key = ClassKey::from_slice(&[1]);

		grouping.absorb(key.hash_code(), smallvec![1], vec![Distribution::singleton(7)], 0, 1, 1);
		grouping.absorb(key.hash_code(), smallvec![1], vec![Distribution::singleton(8)], 1, 1, 1);
		grouping.absorb(key.hash_code(), smallvec![1], vec![Distribution::singleton(7)], 2, 1, 1);

		let class = grouping.get(&[1]).unwrap();
		assert_eq!(class.distributions.len(), 1);
		assert_eq!(class.distributions[0].frequency(7), 2);
		assert_eq!(class.distributions[0].frequency(8), 1);
	}

	#[test]
	fn test_totals() {
		let mut grouping = Grouping::new();
		absorb(&mut grouping, &[1], 0, 2, 3);
		absorb(&mut grouping, &[2], 1, 0, 4);
		assert_eq!(grouping.total_count(), 2);
		assert_eq!(grouping.total_population(), 7);
	}

	#[test]
	fn test_snapshot_layout() {
		let mut grouping = Grouping::new();
		let a = ClassKey::from_slice(&[1]);
		let b = ClassKey::from_slice(&[2]);
		let mut distribution = Distribution::singleton(4);
		distribution.add(6, 2);
		grouping.absorb(a.hash_code(), smallvec![1], vec![distribution], 3, 3, 4);
		grouping.absorb(b.hash_code(), smallvec![2], vec![Distribution::singleton(4)], 0, 1, 1);

		let mut dictionaries = DistributionDictionaries::new();
		let snapshot = grouping.snapshot(1, &mut dictionaries).unwrap();

		assert_eq!(snapshot.width(), 5);
		assert_eq!(snapshot.len(), 2);
		assert_eq!(&snapshot.data()[..3], &[3, 3, 4]);
		assert_eq!(&snapshot.data()[5..8], &[0, 1, 1]);

		let restored = snapshot.entry(0).distributions(&dictionaries).unwrap();
		assert_eq!(restored[0].frequency(4), 1);
		assert_eq!(restored[0].frequency(6), 2);
	}
}
