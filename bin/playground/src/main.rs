// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod census;

use strata_core::{Grouping, Projection, Transformation};
use strata_engine::{Result, TransformRequest, Transformer, TransformerConfig};
use strata_sub_tracing::TracingBuilder;
use tracing::{Level, info};

const ROWS: usize = 200_000;

fn main() -> Result<()> {
	let _ = TracingBuilder::new().level(Level::DEBUG).with_thread_names(true).try_init();

	let census::Census {
		dataset,
		hierarchies,
	} = census::generate(ROWS)?;
	let projection = Projection::all(dataset.attributes());
	let bottom = Transformation::bottom(dataset.attributes());
	let top = Transformation::new(hierarchies.iter().map(|h| h.height().saturating_sub(1) as u8));
	let middle = Transformation::new([2, 1, 1]);

	let config = TransformerConfig::with_available_parallelism().overhead(0.05);
	let mut transformer = Transformer::new(dataset, hierarchies, config)?;
	info!("=== Regroup Engine Demo ===");

	let mut base = Grouping::new();
	let dispatch = transformer.apply(&TransformRequest::full_scan(projection, bottom), &mut base)?;
	info!(classes = base.len(), threads = dispatch.threads, "full scan at the bottom");

	let mut rolled = Grouping::new();
	let request = TransformRequest::rollup(projection, middle.clone(), &base).with_estimated_reduction(0.01);
	let dispatch = transformer.apply(&request, &mut rolled)?;
	info!(classes = rolled.len(), threads = dispatch.threads, "rollup to {middle}");

	let snapshot = transformer.snapshot(&rolled)?;
	info!(
		entries = snapshot.len(),
		width = snapshot.width(),
		value_arrays = transformer.dictionaries().values.len(),
		frequency_arrays = transformer.dictionaries().frequencies.len(),
		"snapshot taken"
	);

	let mut restored = Grouping::new();
	let request = TransformRequest::snapshot(projection, top.clone(), &snapshot).with_estimated_reduction(0.001);
	let dispatch = transformer.apply(&request, &mut restored)?;
	info!(classes = restored.len(), threads = dispatch.threads, "snapshot restore to {top}");

	for (key, class) in restored.ordered().take(5) {
		info!(
			key = ?key.values(),
			count = class.count,
			population = class.population,
			representative = class.representative,
			"equivalence class"
		);
	}

	let stats = transformer.stats();
	info!(
		calls = stats.calls,
		inline_only = stats.inline_only,
		pooled_ranges = stats.pooled_ranges,
		"transformer stats"
	);

	transformer.shutdown();
	Ok(())
}
