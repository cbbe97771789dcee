// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchyard integration tests.
//!
//! Provides a scripted [`MockBackend`] for fast, deterministic tests without
//! a running inference server.

pub mod mock_backend;

pub use mock_backend::MockBackend;
