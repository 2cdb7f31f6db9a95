// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for plugkit integration tests.
//!
//! # Components
//!
//! - [`TestProject`] - Temp project with a descriptor, compiled output, and a local repository root
//! - [`MockRepository`] - In-memory repository recording every write

pub mod harness;
pub mod mock_repository;

pub use harness::{TestProject, TestProjectBuilder};
pub use mock_repository::MockRepository;
