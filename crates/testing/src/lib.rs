// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support shared by the strata crates.
//!
//! Fixtures are generated from fixed formulas, so every run sees the same
//! data and failures reproduce without a seed.

pub mod fixture;
pub mod grouping;
