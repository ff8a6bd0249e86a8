// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Runtime services shared by the strata crates: key hashing and the
//! lifecycle-managed compute pool used to run transformation ranges.

pub mod compute;
pub mod hash;
