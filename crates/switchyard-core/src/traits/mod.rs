// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable generation backends.

pub mod backend;

pub use backend::GenerationBackend;
