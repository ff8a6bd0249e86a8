// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

/// Splits `0..total` into `threads` contiguous ranges.
///
/// Every range but the last holds `total / threads` items; the last one also
/// takes the remainder. Range `0` is the one executed on the calling thread.
pub fn ranges(total: usize, threads: usize) -> Vec<Range<usize>> {
	let threads = threads.max(1);
	let stepping = total / threads;

	(0..threads)
		.map(|i| {
			let start = i * stepping;
			let end = if i == threads - 1 {
				total
			} else {
				(i + 1) * stepping
			};
			start..end
		})
		.collect()
}
