// SPDX-License-Identifier: MPL-2.0
//! `vuvur` is the client engine of a self-hosted media gallery.
//!
//! It implements viewport-driven pagination with stale-response
//! suppression, an endless random stream over a bounded window, slide
//! visibility tracking, and per-slide tap/drag gesture handling, all as
//! synchronous state machines driven by a thin async service. Rendering
//! and input capture stay in the embedding shell; the engine only decides
//! what to fetch and what state the gallery is in.

#![doc(html_root_url = "https://docs.rs/vuvur/0.2.0")]

pub mod application;
pub mod browse;
pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod infrastructure;
pub mod service;
pub mod viewer;

pub use error::{Error, Result};
pub use gallery::{BrowseMode, Command, GalleryController};
pub use service::GalleryService;

#[cfg(test)]
mod test_utils;
