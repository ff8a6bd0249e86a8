// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hash types and functions for strata.
//!
//! Generalized keys are hashed once with xxHash3 when a row is transformed.
//! Containers keyed by such precomputed hashes use [`BuildIdentityHasher`] so
//! the hash is not recomputed on every probe.

use core::hash::{BuildHasherDefault, Hash, Hasher};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash64(pub u64);

impl From<u64> for Hash64 {
	fn from(value: u64) -> Self {
		Hash64(value)
	}
}

impl From<Hash64> for u64 {
	fn from(hash: Hash64) -> Self {
		hash.0
	}
}

impl Hash for Hash64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.0)
	}
}

/// Compute xxHash3 64-bit hash of data.
#[inline]
pub fn xxh3_64(data: &[u8]) -> Hash64 {
	Hash64(xxh3::xxh3_64(data))
}

/// Compute xxHash3 64-bit hash of a sequence of integer codes.
///
/// Values are hashed in their little-endian byte representation, so the
/// result is stable across platforms.
#[inline]
pub fn xxh3_64_codes(codes: &[i32]) -> Hash64 {
	let mut bytes = Vec::with_capacity(codes.len() * 4);
	for code in codes {
		bytes.extend_from_slice(&code.to_le_bytes());
	}
	xxh3_64(&bytes)
}

/// Hasher that forwards a single precomputed `u64`.
///
/// Only meaningful for keys whose `Hash` impl writes exactly one `u64`,
/// such as [`Hash64`].
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
	#[inline]
	fn finish(&self) -> u64 {
		self.0
	}

	fn write(&mut self, bytes: &[u8]) {
		for byte in bytes {
			self.0 = self.0.rotate_left(8) ^ u64::from(*byte);
		}
	}

	#[inline]
	fn write_u64(&mut self, value: u64) {
		self.0 = value;
	}
}

pub type BuildIdentityHasher = BuildHasherDefault<IdentityHasher>;
