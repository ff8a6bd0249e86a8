// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::hash::{Hash, Hasher};

use smallvec::SmallVec;
use strata_runtime::hash::{Hash64, xxh3_64_codes};

pub type KeyValues = SmallVec<[i32; 8]>;

/// Generalized attribute values of one equivalence class, together with
/// their precomputed hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassKey {
	hash: Hash64,
	values: KeyValues,
}

impl ClassKey {
	pub fn new(values: KeyValues) -> Self {
		Self {
			hash: xxh3_64_codes(&values),
			values,
		}
	}

	pub fn from_slice(values: &[i32]) -> Self {
		Self::new(SmallVec::from_slice(values))
	}

	/// Reassembles a key whose hash was computed earlier, e.g. by a worker.
	pub fn with_hash(hash: Hash64, values: KeyValues) -> Self {
		debug_assert_eq!(hash, xxh3_64_codes(&values));
		Self {
			hash,
			values,
		}
	}

	#[inline]
	pub fn hash_code(&self) -> Hash64 {
		self.hash
	}

	#[inline]
	pub fn values(&self) -> &[i32] {
		&self.values
	}

	pub fn into_parts(self) -> (Hash64, KeyValues) {
		(self.hash, self.values)
	}
}

impl Hash for ClassKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.hash.hash(state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_equal_values_hash_equal() {
		assert_eq!(ClassKey::from_slice(&[1, 2]).hash_code(), ClassKey::from_slice(&[1, 2]).hash_code());
		assert_ne!(ClassKey::from_slice(&[1, 2]), ClassKey::from_slice(&[2, 1]));
	}

	#[test]
	fn test_into_parts() {
		let key = ClassKey::from_slice(&[4, 5, 6]);
		let hash = key.hash_code();
		let (h, values) = key.into_parts();
		assert_eq!(h, hash);
		assert_eq!(values.as_slice(), &[4, 5, 6]);
	}
}
