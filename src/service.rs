// SPDX-License-Identifier: MPL-2.0
//! Async driver executing the controller's fetch commands.
//!
//! [`GalleryService`] is the only place the engine awaits: it takes a
//! [`Command`], performs the backend call, and applies the tagged result
//! back onto the controller. Mutation failures (like/delete) are logged
//! and absorbed; the optimistic removal only happens on success, so a
//! failed call leaves the collection exactly as it was.

use crate::application::port::{MediaBackend, ScanStatus, ViewportWatcher};
use crate::config::defaults::SCAN_POLL_INTERVAL;
use crate::domain::{MediaEntry, MediaKey};
use crate::error::Result;
use crate::gallery::{Command, GalleryController};
use std::collections::BTreeMap;

/// Executes controller commands against a backend.
pub struct GalleryService<B: MediaBackend> {
    backend: B,
}

impl<B: MediaBackend> GalleryService<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Runs one command and every follow-up it produces.
    ///
    /// Follow-ups arise when a reply supersedes itself: a gallery page that
    /// answers "scanning" starts the poll loop, whose completion issues a
    /// fresh page-1 fetch.
    pub async fn execute<W: ViewportWatcher>(
        &self,
        controller: &mut GalleryController<W>,
        command: Command,
    ) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            next = self.execute_one(controller, command).await;
        }
    }

    async fn execute_one<W: ViewportWatcher>(
        &self,
        controller: &mut GalleryController<W>,
        command: Command,
    ) -> Option<Command> {
        match command {
            Command::FetchPage(fetch) => {
                let page = fetch.request.page;
                let reply = self.backend.fetch_page(&fetch.request).await;
                controller.apply_page(fetch.epoch, page, reply);
                if controller.scan_state().is_scanning() {
                    return self.poll_scan(controller).await;
                }
                None
            }
            Command::FetchRandom(fetch) => {
                let batch = self.backend.fetch_random(fetch.count).await;
                controller.apply_random(batch);
                None
            }
            Command::ToggleLike(key) => {
                match self.backend.toggle_like(&key).await {
                    Ok(()) => controller.like_succeeded(&key),
                    Err(err) => log::warn!("like toggle failed for {key}: {err}"),
                }
                None
            }
            Command::Delete(key) => {
                match self.backend.delete(&key).await {
                    Ok(()) => controller.delete_succeeded(&key),
                    Err(err) => log::warn!("delete failed for {key}: {err}"),
                }
                None
            }
        }
    }

    /// Polls the scan status until the backend reports completion, then
    /// returns the refetch command for the suppressed listing.
    ///
    /// A poll failure is treated as completion: an unreachable status
    /// endpoint must not pin the gallery in the scanning state forever,
    /// and the follow-up page fetch surfaces the real error if the
    /// backend is down.
    async fn poll_scan<W: ViewportWatcher>(
        &self,
        controller: &mut GalleryController<W>,
    ) -> Option<Command> {
        let mut ticker = tokio::time::interval(SCAN_POLL_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately; consume it so
        // the first status request happens one interval after the
        // scanning reply.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let status = match self.backend.scan_status().await {
                Ok(status) => status,
                Err(err) => {
                    log::warn!("scan status poll failed, assuming complete: {err}");
                    ScanStatus::Complete
                }
            };
            let refetch = controller.apply_scan_status(status);
            if refetch.is_some() || !controller.scan_state().is_scanning() {
                return refetch;
            }
        }
    }

    /// One random entry matching `query`, for the single-shot random
    /// search. An empty match surfaces
    /// [`crate::error::Error::EmptyResult`].
    pub async fn random_single(&self, query: &str) -> Result<MediaEntry> {
        self.backend.random_single(query).await
    }

    /// The EXIF tag mapping of an entry, fetched on demand for the viewer
    /// panel.
    pub async fn fetch_exif(&self, key: &MediaKey) -> Result<BTreeMap<String, String>> {
        self.backend.fetch_exif(key).await
    }
}
