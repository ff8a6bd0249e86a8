// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Bitmask of the attributes that take part in a transformation.
///
/// Bit `i` selects attribute `i`; at most 64 attributes are addressable.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(pub u64);

impl Projection {
	pub const MAX_ATTRIBUTES: usize = 64;

	pub const fn none() -> Self {
		Projection(0)
	}

	/// Selects attributes `0..attributes`.
	pub const fn all(attributes: usize) -> Self {
		if attributes >= Self::MAX_ATTRIBUTES {
			Projection(u64::MAX)
		} else {
			Projection((1u64 << attributes) - 1)
		}
	}

	#[inline]
	pub const fn contains(&self, attribute: usize) -> bool {
		attribute < Self::MAX_ATTRIBUTES && self.0 & (1u64 << attribute) != 0
	}

	pub const fn len(&self) -> usize {
		self.0.count_ones() as usize
	}

	pub const fn is_empty(&self) -> bool {
		self.0 == 0
	}

	/// Highest selected attribute, if any.
	pub const fn max_attribute(&self) -> Option<usize> {
		if self.0 == 0 {
			None
		} else {
			Some(63 - self.0.leading_zeros() as usize)
		}
	}

	/// Selected attributes in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
		let mut bits = self.0;
		std::iter::from_fn(move || {
			if bits == 0 {
				return None;
			}
			let attribute = bits.trailing_zeros() as usize;
			bits &= bits - 1;
			Some(attribute)
		})
	}
}

impl FromIterator<usize> for Projection {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut bits = 0u64;
		for attribute in iter {
			if attribute < Self::MAX_ATTRIBUTES {
				bits |= 1u64 << attribute;
			}
		}
		Projection(bits)
	}
}

impl Display for Projection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{:#b}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_all() {
		assert_eq!(Projection::all(0), Projection(0));
		assert_eq!(Projection::all(3), Projection(0b111));
		assert_eq!(Projection::all(64), Projection(u64::MAX));
	}

	#[test]
	fn test_iter_is_ascending() {
		let projection = Projection(0b1010_0101);
		assert_eq!(projection.iter().collect::<Vec<_>>(), vec![0, 2, 5, 7]);
		assert_eq!(projection.len(), 4);
		assert_eq!(projection.max_attribute(), Some(7));
	}

	#[test]
	fn test_from_iter() {
		let projection: Projection = [3, 1].into_iter().collect();
		assert!(projection.contains(1));
		assert!(projection.contains(3));
		assert!(!projection.contains(2));
		assert!(!projection.contains(64));
	}

	#[test]
	fn test_empty() {
		assert!(Projection::none().is_empty());
		assert_eq!(Projection::none().max_attribute(), None);
		assert_eq!(Projection::none().iter().count(), 0);
	}
}
