// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Data model of the regroup engine.
//!
//! A [`Dataset`] holds integer-coded attribute columns. Applying a
//! [`Transformation`] to the attributes selected by a [`Projection`] maps each
//! row to a generalized key; rows sharing a key form one equivalence class in
//! a [`Grouping`].

pub mod data;
pub mod distribution;
pub mod grouping;
pub mod projection;
pub mod transformation;
pub mod transition;

pub use data::{Dataset, GeneralizationHierarchy};
pub use distribution::{Distribution, DistributionDictionaries, IntArrayDictionary};
pub use grouping::{ClassKey, EquivalenceClass, Grouping, Snapshot};
pub use projection::Projection;
pub use strata_type::{Error, Result};
pub use transformation::Transformation;
pub use transition::TransitionStrategy;
