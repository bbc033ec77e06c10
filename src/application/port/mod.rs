// SPDX-License-Identifier: MPL-2.0
//! Ports: trait seams implemented by infrastructure adapters.
//!
//! The engine never talks to a transport or a rendering surface directly;
//! it goes through [`backend::MediaBackend`] for the gallery API and
//! [`viewport::ViewportWatcher`] for element visibility, so both can be
//! replaced by fakes in headless tests.

pub mod backend;
pub mod viewport;

pub use backend::{GalleryListing, GalleryReply, MediaBackend, ScanProgress, ScanStatus};
pub use viewport::{ViewportWatcher, WatchId, WatchTarget};
