// SPDX-License-Identifier: MPL-2.0
//! Incremental page-based loading with stale-response suppression.
//!
//! [`PageLoader`] owns the ordered item collection for the gallery grid.
//! It is a synchronous state machine: navigation events produce
//! [`PageFetch`] commands for the async driver, and backend replies come
//! back through [`PageLoader::apply_page`] tagged with the epoch they were
//! issued under. A response from a superseded epoch is dropped on arrival,
//! never merged; that tag-and-discard rule stands in for request
//! cancellation, which the transport does not offer.

use crate::application::port::{GalleryReply, ScanProgress, ScanStatus};
use crate::browse::request::{PageRequest, RequestState};
use crate::domain::{MediaEntry, MediaKey};
use crate::error::{Error, Result};

/// A fetch command for one page, tagged with the epoch it belongs to.
/// The driver passes the tag back unchanged with the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFetch {
    pub epoch: u64,
    pub request: PageRequest,
}

/// Backend index state as last observed by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing observed yet.
    Unknown,
    /// The backend is indexing; the item collection is suppressed and the
    /// driver polls the scan status every
    /// [`crate::config::defaults::SCAN_POLL_INTERVAL`].
    Scanning(ScanProgress),
    Complete,
}

impl ScanState {
    /// Returns `true` while the backend is indexing.
    #[must_use]
    pub fn is_scanning(self) -> bool {
        matches!(self, ScanState::Scanning(_))
    }
}

/// Viewport-driven paginated loader for the gallery listing.
pub struct PageLoader {
    request: RequestState,
    /// Monotonically increasing generation of the request state. Bumped on
    /// every state change so slow replies from the previous state can be
    /// recognized and dropped.
    epoch: u64,
    /// Highest page number applied in the current epoch. Zero until the
    /// first reply lands.
    pages_applied: u32,
    total_pages: Option<u32>,
    items: Vec<MediaEntry>,
    is_loading: bool,
    scan: ScanState,
}

impl PageLoader {
    #[must_use]
    pub fn new(request: RequestState) -> Self {
        Self {
            request,
            epoch: 0,
            pages_applied: 0,
            total_pages: None,
            items: Vec::new(),
            is_loading: false,
            scan: ScanState::Unknown,
        }
    }

    /// Issues the initial page-1 fetch. Also used whenever the collection
    /// must be rebuilt from scratch under a fresh epoch.
    pub fn start(&mut self) -> PageFetch {
        self.begin_epoch()
    }

    /// Replaces the canonical request state. A no-op returning `None` when
    /// nothing changed; otherwise the previous epoch is superseded, the
    /// collection cleared, and a page-1 fetch issued.
    pub fn set_request_state(&mut self, request: RequestState) -> Option<PageFetch> {
        if request == self.request {
            return None;
        }
        self.request = request;
        Some(self.begin_epoch())
    }

    /// Requests the next page. No-op while a fetch is in flight or when
    /// the server has no more pages.
    pub fn load_next_page(&mut self) -> Option<PageFetch> {
        if self.is_loading || !self.has_more() {
            return None;
        }
        self.is_loading = true;
        Some(PageFetch {
            epoch: self.epoch,
            request: self.request.page(self.pages_applied + 1),
        })
    }

    /// Applies a backend reply for `page`, issued under `epoch`.
    ///
    /// Out-of-epoch replies leave the loader untouched, including the
    /// loading flag, which belongs to the current epoch's own request.
    /// Within the epoch, a page is appended at most once and only in
    /// order.
    pub fn apply_page(&mut self, epoch: u64, page: u32, reply: Result<GalleryReply>) {
        if epoch != self.epoch {
            log::debug!("dropping stale page {page} reply from epoch {epoch} (now {})", self.epoch);
            return;
        }
        self.is_loading = false;
        match reply {
            Ok(GalleryReply::Listing(listing)) => {
                if page != self.pages_applied + 1 {
                    log::debug!("dropping duplicate reply for page {page}");
                    return;
                }
                self.scan = ScanState::Complete;
                self.pages_applied = page;
                self.total_pages = Some(listing.total_pages);
                self.items.extend(listing.items);
            }
            Ok(GalleryReply::Scanning(progress)) => {
                // The index is (re)building: suppress whatever was loaded
                // and let the driver poll until the scan completes.
                self.scan = ScanState::Scanning(progress);
                self.items.clear();
                self.pages_applied = 0;
                self.total_pages = None;
            }
            Err(err) => self.apply_failure(page, &err),
        }
    }

    fn apply_failure(&mut self, page: u32, err: &Error) {
        if page <= 1 {
            // Initial load failed: degrade to an empty, retry-able state.
            log::warn!("page 1 load failed: {err}");
            self.items.clear();
            self.pages_applied = 0;
            self.total_pages = None;
        } else {
            // Pagination failed: keep the partially loaded gallery; the
            // cleared loading flag lets the tail sentinel retry.
            log::warn!("page {page} load failed, keeping {} items: {err}", self.items.len());
        }
    }

    /// Applies a scan-status poll result. Returns a page-1 fetch when the
    /// index just became ready and the current state should re-run.
    pub fn apply_scan_status(&mut self, status: ScanStatus) -> Option<PageFetch> {
        match status {
            ScanStatus::Scanning(progress) => {
                self.scan = ScanState::Scanning(progress);
                None
            }
            ScanStatus::Complete => {
                let was_ready = self.scan == ScanState::Complete;
                self.scan = ScanState::Complete;
                if was_ready || self.is_loading {
                    return None;
                }
                Some(self.begin_epoch())
            }
        }
    }

    /// Removes every entry with the given identity (optimistic removal
    /// after a like/delete success). Returns how many were removed;
    /// duplicate identities are all dropped so they cannot corrupt later
    /// list operations.
    pub fn remove(&mut self, key: &MediaKey) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.key() != *key);
        before - self.items.len()
    }

    fn begin_epoch(&mut self) -> PageFetch {
        self.epoch += 1;
        self.pages_applied = 0;
        self.total_pages = None;
        self.items.clear();
        self.is_loading = true;
        PageFetch {
            epoch: self.epoch,
            request: self.request.page(1),
        }
    }

    /// The ordered item collection of the current epoch.
    #[must_use]
    pub fn items(&self) -> &[MediaEntry] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the server has pages beyond what was applied. Before the
    /// first reply (total unknown) this is `true`, so a failed initial
    /// load stays retry-able from the tail sentinel.
    #[must_use]
    pub fn has_more(&self) -> bool {
        if self.scan.is_scanning() {
            return false;
        }
        match self.total_pages {
            Some(total) => self.pages_applied < total,
            None => self.pages_applied == 0,
        }
    }

    #[must_use]
    pub fn scan_state(&self) -> ScanState {
        self.scan
    }

    #[must_use]
    pub fn request(&self) -> &RequestState {
        &self.request
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new(RequestState::default())
    }
}
