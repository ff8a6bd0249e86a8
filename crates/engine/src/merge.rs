// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{ClassKey, EquivalenceClass, Grouping};
use tracing::trace;

/// Classes of one drained worker-local grouping, in insertion order.
pub type PartialGrouping = Vec<(ClassKey, EquivalenceClass)>;

/// Folds one partial grouping into `target`.
pub fn merge_partial(target: &mut Grouping, partial: PartialGrouping) {
	let classes = partial.len();
	for (key, class) in partial {
		let (hash, values) = key.into_parts();
		target.absorb(hash, values, class.distributions, class.representative, class.count, class.population);
	}
	trace!(classes, target = target.len(), "merged partial grouping");
}

/// Folds every partial grouping into `target`, in the order given.
pub fn merge(target: &mut Grouping, partials: impl IntoIterator<Item = PartialGrouping>) {
	for partial in partials {
		merge_partial(target, partial);
	}
}
