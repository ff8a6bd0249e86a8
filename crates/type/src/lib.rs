// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Error and result types shared across the strata workspace.

pub mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
