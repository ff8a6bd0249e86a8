// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

use smallvec::{SmallVec, smallvec};
use strata_core::{Dataset, Distribution, Grouping, Projection, grouping::KeyValues};
use strata_runtime::hash::xxh3_64_codes;
use strata_type::Result;

use super::{Input, WorkerContext};

/// Key-building variant, chosen once per call from the projection shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeWorker {
	/// Exactly one active attribute.
	Single {
		attribute: usize,
	},
	/// Every attribute `0..attributes` is active.
	Full {
		attributes: usize,
	},
	/// Any other selection, including none at all.
	Sparse {
		attributes: SmallVec<[usize; 8]>,
	},
}

impl RangeWorker {
	pub fn select(projection: Projection, attributes: usize) -> Self {
		let active: SmallVec<[usize; 8]> = projection.iter().collect();
		match active.as_slice() {
			[attribute] => RangeWorker::Single {
				attribute: *attribute,
			},
			_ if attributes > 0 && projection == Projection::all(attributes) => RangeWorker::Full {
				attributes,
			},
			_ => RangeWorker::Sparse {
				attributes: active,
			},
		}
	}

	/// Transforms the work items `range` of `ctx.input` into `target`.
	pub fn process(&self, ctx: &WorkerContext<'_>, range: Range<usize>, target: &mut Grouping) -> Result<()> {
		match ctx.input {
			Input::Rows => {
				for row in range {
					let key = self.key(ctx, row)?;
					let counted = ctx.dataset.in_subset(row);
					let distributions = if counted {
						sensitive_values(ctx.dataset, row)
					} else {
						Vec::new()
					};
					target.absorb(xxh3_64_codes(&key), key, distributions, row, counted as usize, 1);
				}
			}
			Input::Classes(source) => {
				for (_, class) in source.ordered().skip(range.start).take(range.len()) {
					ctx.dataset.check_row(class.representative)?;
					let key = self.key(ctx, class.representative)?;
					target.absorb(
						xxh3_64_codes(&key),
						key,
						class.distributions.clone(),
						class.representative,
						class.count,
						class.population,
					);
				}
			}
			Input::Snapshot(snapshot) => {
				for index in range {
					let entry = snapshot.entry(index);
					let representative = entry.representative()?;
					ctx.dataset.check_row(representative)?;
					let count = entry.count()?;
					// Classes without counted rows never held a distribution
					let distributions = if count == 0 {
						Vec::new()
					} else {
						entry.distributions(ctx.dictionaries)?
					};
					let key = self.key(ctx, representative)?;
					target.absorb(
						xxh3_64_codes(&key),
						key,
						distributions,
						representative,
						count,
						entry.population()?,
					);
				}
			}
		}
		Ok(())
	}

	fn key(&self, ctx: &WorkerContext<'_>, row: usize) -> Result<KeyValues> {
		match self {
			RangeWorker::Single {
				attribute,
			} => Ok(smallvec![ctx.generalize(*attribute, row)?]),
			RangeWorker::Full {
				attributes,
			} => (0..*attributes).map(|attribute| ctx.generalize(attribute, row)).collect(),
			RangeWorker::Sparse {
				attributes,
			} => attributes.iter().map(|&attribute| ctx.generalize(attribute, row)).collect(),
		}
	}
}

fn sensitive_values(dataset: &Dataset, row: usize) -> Vec<Distribution> {
	(0..dataset.sensitive_attributes())
		.map(|attribute| Distribution::singleton(dataset.sensitive_column(attribute)[row]))
		.collect()
}

#[cfg(test)]
mod tests {
	use strata_core::{DistributionDictionaries, GeneralizationHierarchy, Transformation};
	use strata_type::Error;

	use super::*;

	fn dataset() -> Dataset {
		Dataset::new(vec![vec![0, 1, 2, 3, 0, 1], vec![0, 0, 1, 1, 2, 2]])
			.unwrap()
			.with_sensitive(vec![vec![7, 8, 7, 8, 7, 8]])
			.unwrap()
	}

	fn hierarchies() -> Vec<GeneralizationHierarchy> {
		vec![
			GeneralizationHierarchy::new(vec![vec![0, 0], vec![1, 0], vec![2, 1], vec![3, 1]]).unwrap(),
			GeneralizationHierarchy::new(vec![vec![0, 0], vec![1, 0], vec![2, 0]]).unwrap(),
		]
	}

	fn run(
		worker: &RangeWorker,
		dataset: &Dataset,
		levels: &[u8],
		input: Input<'_>,
		range: Range<usize>,
	) -> Result<Grouping> {
		let hierarchies = hierarchies();
		let dictionaries = DistributionDictionaries::new();
		let transformation = Transformation::from(levels);
		let ctx = WorkerContext {
			dataset,
			hierarchies: &hierarchies,
			dictionaries: &dictionaries,
			transformation: &transformation,
			input,
		};
		let mut target = Grouping::new();
		worker.process(&ctx, range, &mut target)?;
		Ok(target)
	}

	#[test]
	fn test_select_by_projection_shape() {
		assert_eq!(
			RangeWorker::select(Projection(0b100), 3),
			RangeWorker::Single {
				attribute: 2
			}
		);
		assert_eq!(
			RangeWorker::select(Projection::all(3), 3),
			RangeWorker::Full {
				attributes: 3
			}
		);
		assert_eq!(
			RangeWorker::select(Projection(0b101), 3),
			RangeWorker::Sparse {
				attributes: smallvec![0, 2]
			}
		);
		assert_eq!(
			RangeWorker::select(Projection::none(), 3),
			RangeWorker::Sparse {
				attributes: SmallVec::new()
			}
		);
	}

	#[test]
	fn test_full_scan_groups_rows() {
		let dataset = dataset();
		let worker = RangeWorker::select(Projection::all(2), 2);
		let grouping = run(&worker, &dataset, &[1, 1], Input::Rows, 0..6).unwrap();

		assert_eq!(grouping.len(), 2);
		let low = grouping.get(&[0, 0]).unwrap();
		assert_eq!(low.count, 4);
		assert_eq!(low.population, 4);
		assert_eq!(low.representative, 0);
		assert_eq!(low.distributions[0].frequency(7), 2);
		assert_eq!(low.distributions[0].frequency(8), 2);

		let high = grouping.get(&[1, 0]).unwrap();
		assert_eq!(high.representative, 2);
		assert_eq!(high.count, 2);
	}

	#[test]
	fn test_only_the_range_is_processed() {
		let dataset = dataset();
		let worker = RangeWorker::select(Projection::all(2), 2);
		let grouping = run(&worker, &dataset, &[0, 0], Input::Rows, 2..4).unwrap();
		assert_eq!(grouping.total_population(), 2);
		assert_eq!(grouping.get(&[2, 1]).unwrap().representative, 2);
	}

	#[test]
	fn test_single_attribute_key() {
		let dataset = dataset();
		let worker = RangeWorker::select(Projection(0b10), 2);
		let grouping = run(&worker, &dataset, &[0, 0], Input::Rows, 0..6).unwrap();
		assert_eq!(grouping.len(), 3);
		assert_eq!(grouping.get(&[2]).unwrap().population, 2);
	}

	#[test]
	fn test_empty_projection_collapses_everything() {
		let dataset = dataset();
		let worker = RangeWorker::select(Projection::none(), 2);
		let grouping = run(&worker, &dataset, &[0, 0], Input::Rows, 0..6).unwrap();
		assert_eq!(grouping.len(), 1);
		assert_eq!(grouping.get(&[]).unwrap().count, 6);
	}

	#[test]
	fn test_rows_outside_subset_only_add_population() {
		let dataset = dataset().with_subset(vec![true, false, true, false, true, false]).unwrap();
		let worker = RangeWorker::select(Projection::none(), 2);
		let grouping = run(&worker, &dataset, &[0, 0], Input::Rows, 0..6).unwrap();

		let class = grouping.get(&[]).unwrap();
		assert_eq!(class.count, 3);
		assert_eq!(class.population, 6);
		assert_eq!(class.distributions[0].frequency(7), 3);
		assert_eq!(class.distributions[0].frequency(8), 0);
	}

	#[test]
	fn test_rollup_carries_class_state() {
		let dataset = dataset();
		let worker = RangeWorker::select(Projection::all(2), 2);
		let source = run(&worker, &dataset, &[0, 0], Input::Rows, 0..6).unwrap();
		assert_eq!(source.len(), 6);

		let rolled = run(&worker, &dataset, &[1, 1], Input::Classes(&source), 0..source.len()).unwrap();
		assert_eq!(rolled.len(), 2);
		assert_eq!(rolled.get(&[0, 0]).unwrap().count, 4);
		assert_eq!(rolled.get(&[1, 0]).unwrap().distributions[0].frequency(7), 1);
	}

	#[test]
	fn test_missing_hierarchy_value_is_reported() {
		let dataset = Dataset::new(vec![vec![0, 9], vec![0, 0]]).unwrap();
		let worker = RangeWorker::select(Projection::all(2), 2);
		let err = run(&worker, &dataset, &[0, 0], Input::Rows, 0..2).unwrap_err();
		assert!(matches!(
			err,
			Error::ValueOutOfHierarchy {
				attribute: 0,
				value: 9
			}
		));
	}

	#[test]
	fn test_snapshot_representative_must_exist() {
		let dataset = dataset();
		let snapshot = strata_core::Snapshot::new(vec![42, 1, 1], 3).unwrap();
		let worker = RangeWorker::select(Projection::all(2), 2);
		let err = run(&worker, &dataset, &[0, 0], Input::Snapshot(&snapshot), 0..1).unwrap_err();
		assert!(matches!(
			err,
			Error::RowOutOfRange {
				row: 42,
				rows: 6
			}
		));
	}
}
