// SPDX-License-Identifier: MPL-2.0
//! Core domain types shared across the engine.

pub mod media;

pub use media::{MediaEntry, MediaKey, MediaType};
