// SPDX-License-Identifier: MPL-2.0
//! The top-level gallery controller.
//!
//! [`GalleryController`] wires the browse-mode loaders, the visibility
//! tracker, and the viewer session together behind a single synchronous
//! surface. Every entry point either mutates state in place or hands back
//! a [`Command`] for the async driver; the controller itself never blocks
//! and never talks to the network.
//!
//! One [`VisibilityTracker`] serves both layouts: while the viewer is
//! closed it watches the grid's tail sentinel, while the viewer is open it
//! watches every slide to keep the centered one current. Any change to the
//! visible item set re-targets the tracker so stale watches cannot fire.

use crate::application::port::{GalleryReply, ScanStatus, ViewportWatcher, WatchId};
use crate::browse::{PageFetch, PageLoader, RandomFetch, RandomStreamer, RequestState, ScanState};
use crate::domain::{MediaEntry, MediaKey};
use crate::error::Result;
use crate::viewer::{GestureConfig, ViewerSession, VisibilityEvent, VisibilityTracker};

/// Which collection drives the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// Paginated listing ordered by the request state's sort key.
    Paged,
    /// Endless random stream over a bounded window.
    RandomStream,
}

/// Work the controller wants the async driver to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchPage(PageFetch),
    FetchRandom(RandomFetch),
    ToggleLike(MediaKey),
    Delete(MediaKey),
}

/// Synchronous state machine for the whole gallery surface.
pub struct GalleryController<W: ViewportWatcher> {
    mode: BrowseMode,
    loader: PageLoader,
    streamer: RandomStreamer,
    tracker: VisibilityTracker<W>,
    session: Option<ViewerSession>,
    gesture_config: GestureConfig,
    preload_count: usize,
}

impl<W: ViewportWatcher> GalleryController<W> {
    #[must_use]
    pub fn new(
        request: RequestState,
        history_size: usize,
        preload_count: usize,
        gesture_config: GestureConfig,
        watcher: W,
    ) -> Self {
        Self {
            mode: BrowseMode::Paged,
            loader: PageLoader::new(request),
            streamer: RandomStreamer::new(history_size, preload_count),
            tracker: VisibilityTracker::new(watcher),
            session: None,
            gesture_config,
            preload_count,
        }
    }

    /// Starts paged browsing: watches the tail sentinel and issues the
    /// initial page-1 fetch.
    pub fn browse_paged(&mut self) -> Command {
        self.mode = BrowseMode::Paged;
        self.session = None;
        self.tracker.observe_sentinel();
        Command::FetchPage(self.loader.start())
    }

    /// Starts random browsing with an initial window fill.
    pub fn browse_random(&mut self, initial_count: usize) -> Option<Command> {
        self.mode = BrowseMode::RandomStream;
        self.session = None;
        self.tracker.observe_sentinel();
        self.streamer.start(initial_count).map(Command::FetchRandom)
    }

    /// Replaces the listing request state (sort key, filter query, page
    /// size). A change supersedes the current epoch and refetches page 1.
    pub fn set_request_state(&mut self, request: RequestState) -> Option<Command> {
        self.loader.set_request_state(request).map(Command::FetchPage)
    }

    /// Feeds one visibility report from the embedder.
    ///
    /// A sentinel entry defers to the active loader. A centered-slide
    /// change updates the session and, in random mode, the streamer's
    /// displayed index; nearing the window's tail there issues the next
    /// random prefetch.
    pub fn report_visibility(&mut self, id: WatchId, ratio: f32) -> Option<Command> {
        match self.tracker.report(id, ratio)? {
            VisibilityEvent::SentinelEntered => match self.mode {
                BrowseMode::Paged => self.loader.load_next_page().map(Command::FetchPage),
                BrowseMode::RandomStream => self
                    .streamer
                    .advance(self.preload_count.max(1))
                    .map(Command::FetchRandom),
            },
            VisibilityEvent::SlideCentered { index, key } => {
                if let Some(session) = &mut self.session {
                    session.slide_centered(index, key);
                }
                if self.mode == BrowseMode::RandomStream {
                    self.streamer.set_current(index);
                    // The random stream has no tail sentinel while the
                    // viewer is open; nearing the window's tail is what
                    // triggers the next prefetch.
                    if self.streamer.near_tail() {
                        return self
                            .streamer
                            .advance(self.preload_count.max(1))
                            .map(Command::FetchRandom);
                    }
                }
                None
            }
        }
    }

    /// Opens the viewer on the activated thumbnail and switches the
    /// tracker to slide watching.
    pub fn open_viewer(&mut self, index: usize) {
        let Some(key) = self.items().get(index).map(MediaEntry::key) else {
            return;
        };
        if self.mode == BrowseMode::RandomStream {
            self.streamer.set_current(index);
        }
        self.session = Some(ViewerSession::open_at(index, key, self.gesture_config));
        self.observe_slides();
    }

    /// Closes the viewer and returns the tracker to the tail sentinel.
    pub fn close_viewer(&mut self) {
        self.session = None;
        self.tracker.observe_sentinel();
    }

    /// Applies a page reply. The slide set may have grown, so an open
    /// viewer re-observes.
    pub fn apply_page(&mut self, epoch: u64, page: u32, reply: Result<GalleryReply>) {
        self.loader.apply_page(epoch, page, reply);
        if self.session.is_some() {
            self.observe_slides();
        }
    }

    /// Applies a scan-status poll result; a completion while the listing
    /// is suppressed yields a fresh page-1 fetch.
    pub fn apply_scan_status(&mut self, status: ScanStatus) -> Option<Command> {
        self.loader.apply_scan_status(status).map(Command::FetchPage)
    }

    /// Applies a random-batch reply. Trimming may shift every slide
    /// position, so an open session is realigned to the streamer's
    /// recalculated index before the tracker re-observes.
    pub fn apply_random(&mut self, batch: Result<Vec<MediaEntry>>) {
        self.streamer.apply_batch(batch);
        if let Some(session) = &mut self.session {
            if let Some(current) = self.streamer.current() {
                session.slide_centered(self.streamer.current_index(), current.key());
            }
            self.observe_slides();
        }
    }

    /// Requests a like toggle for the open slide.
    pub fn like_current(&mut self) -> Option<Command> {
        self.current_key().map(Command::ToggleLike)
    }

    /// Requests deletion of the open slide.
    pub fn delete_current(&mut self) -> Option<Command> {
        self.current_key().map(Command::Delete)
    }

    /// The backend confirmed a like toggle; the entry leaves the current
    /// collection (a liked item no longer matches the unliked listing and
    /// vice versa, so the grid refreshes lazily via removal).
    pub fn like_succeeded(&mut self, key: &MediaKey) {
        self.remove_entry(key);
    }

    /// The backend confirmed a deletion.
    pub fn delete_succeeded(&mut self, key: &MediaKey) {
        self.remove_entry(key);
    }

    fn remove_entry(&mut self, key: &MediaKey) {
        let removed_index = self.items().iter().position(|item| item.key() == *key);
        let removed = match self.mode {
            BrowseMode::Paged => self.loader.remove(key),
            BrowseMode::RandomStream => self.streamer.remove(key),
        };
        if removed == 0 {
            return;
        }
        if self.session.as_ref().is_some_and(|s| s.current_key() == Some(key)) {
            self.close_viewer();
            return;
        }
        if let (Some(session), Some(index)) = (&mut self.session, removed_index) {
            session.entry_removed(key, index);
        }
        if self.session.is_some() {
            self.observe_slides();
        }
    }

    fn observe_slides(&mut self) {
        let keys: Vec<MediaKey> = self.items().iter().map(MediaEntry::key).collect();
        self.tracker.observe_slides(&keys);
    }

    /// The item collection of the active browse mode.
    #[must_use]
    pub fn items(&self) -> &[MediaEntry] {
        match self.mode {
            BrowseMode::Paged => self.loader.items(),
            BrowseMode::RandomStream => self.streamer.window(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self.mode {
            BrowseMode::Paged => self.loader.is_loading(),
            BrowseMode::RandomStream => self.streamer.is_loading(),
        }
    }

    #[must_use]
    pub fn scan_state(&self) -> ScanState {
        self.loader.scan_state()
    }

    #[must_use]
    pub fn request(&self) -> &RequestState {
        self.loader.request()
    }

    /// The open viewer session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&ViewerSession> {
        self.session.as_ref()
    }

    /// Mutable session access, for gesture and EXIF-panel input routing.
    pub fn session_mut(&mut self) -> Option<&mut ViewerSession> {
        self.session.as_mut()
    }

    /// Identity of the open slide, if the viewer is open.
    #[must_use]
    pub fn current_key(&self) -> Option<MediaKey> {
        self.session.as_ref()?.current_key().cloned()
    }

    #[must_use]
    pub fn tracker(&self) -> &VisibilityTracker<W> {
        &self.tracker
    }
}
