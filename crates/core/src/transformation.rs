// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strata_type::{Error, Result};

use crate::{GeneralizationHierarchy, Projection};

/// Generalization level per attribute, indexed like [`Projection`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformation(SmallVec<[u8; 16]>);

impl Transformation {
	pub fn new(levels: impl IntoIterator<Item = u8>) -> Self {
		Self(levels.into_iter().collect())
	}

	/// All attributes at level `0`.
	pub fn bottom(attributes: usize) -> Self {
		Self(SmallVec::from_elem(0, attributes))
	}

	#[inline]
	pub fn level(&self, attribute: usize) -> u8 {
		self.0[attribute]
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Checks that every attribute selected by `projection` exists and that
	/// its level is within its hierarchy.
	pub fn validate(&self, projection: Projection, hierarchies: &[GeneralizationHierarchy]) -> Result<()> {
		if self.0.len() != hierarchies.len() {
			return Err(Error::TransformationArity {
				expected: hierarchies.len(),
				actual: self.0.len(),
			});
		}

		if let Some(attribute) = projection.max_attribute() {
			if attribute >= hierarchies.len() {
				return Err(Error::ProjectionOutOfRange {
					attribute,
					attributes: hierarchies.len(),
				});
			}
		}

		for attribute in projection.iter() {
			let level = self.0[attribute];
			let height = hierarchies[attribute].height();
			if level as usize >= height {
				return Err(Error::LevelOutOfRange {
					attribute,
					level,
					height,
				});
			}
		}

		Ok(())
	}
}

impl From<&[u8]> for Transformation {
	fn from(levels: &[u8]) -> Self {
		Self(SmallVec::from_slice(levels))
	}
}

impl Display for Transformation {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, level) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{level}")?;
		}
		f.write_str("]")
	}
}
