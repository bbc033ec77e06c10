// SPDX-License-Identifier: MPL-2.0
//! Gallery backend port definition.
//!
//! This module defines the [`MediaBackend`] trait for the HTTP API the
//! engine consumes. Infrastructure adapters implement this trait; the
//! engine treats every operation as an opaque async call returning the
//! shapes below and never sees transport, auth, or persistence details.

use crate::browse::PageRequest;
use crate::domain::{MediaEntry, MediaKey};
use crate::error::Result;
use futures_util::future::BoxFuture;
use std::collections::BTreeMap;

/// One page of gallery results.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryListing {
    pub items: Vec<MediaEntry>,
    pub total_pages: u32,
}

/// Backend indexing progress, reported while a library scan is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub progress: u64,
    pub total: u64,
}

/// Reply to a paginated gallery request.
///
/// A backend that is still indexing answers gallery requests with its scan
/// progress instead of a listing; the loader suppresses the item
/// collection and polls until the scan completes.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryReply {
    Listing(GalleryListing),
    Scanning(ScanProgress),
}

/// Result of a scan-status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Complete,
    Scanning(ScanProgress),
}

impl ScanStatus {
    /// Returns `true` once the backend's index is ready to serve listings.
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, ScanStatus::Complete)
    }
}

/// Port for the gallery backend API.
///
/// Methods return boxed futures so the trait stays object-safe; callers
/// hold a `dyn MediaBackend` and the single-threaded driver awaits one
/// logical flow at a time. There is no cancellation primitive: an
/// in-flight request cannot be aborted, it is rendered moot on arrival by
/// the epoch guard in the loaders.
pub trait MediaBackend: Send + Sync {
    /// Fetches one page of the gallery listing for the given request.
    fn fetch_page(&self, request: &PageRequest) -> BoxFuture<'_, Result<GalleryReply>>;

    /// Fetches `count` random entries for the endless-browse stream.
    fn fetch_random(&self, count: usize) -> BoxFuture<'_, Result<Vec<MediaEntry>>>;

    /// Fetches a single random entry whose filename or EXIF data matches
    /// `query`. An empty match reports [`crate::error::Error::EmptyResult`].
    fn random_single(&self, query: &str) -> BoxFuture<'_, Result<MediaEntry>>;

    /// Polls the backend's library-scan status.
    fn scan_status(&self) -> BoxFuture<'_, Result<ScanStatus>>;

    /// Toggles the liked flag of an entry.
    fn toggle_like(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>>;

    /// Moves an entry to the backend's recycle bin.
    fn delete(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>>;

    /// Fetches the EXIF tag mapping of an entry.
    fn fetch_exif(&self, key: &MediaKey) -> BoxFuture<'_, Result<BTreeMap<String, String>>>;
}
