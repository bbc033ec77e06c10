// SPDX-License-Identifier: MPL-2.0
//! Endless random browsing over a bounded sliding window.
//!
//! [`RandomStreamer`] keeps fetching random entries while the user scrolls
//! and discards history past a configurable window, without ever shifting
//! the item the user is currently looking at. The window holds at most
//! `history_size + 1 + preload_count` entries: the seen items behind the
//! current slide, the current slide, and the prefetched items ahead of it.

use crate::domain::{MediaEntry, MediaKey};
use crate::error::Result;

/// A fetch command for `count` more random entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomFetch {
    pub count: usize,
}

/// Sliding-window streamer for random browsing.
pub struct RandomStreamer {
    window: Vec<MediaEntry>,
    /// Index of the slide currently displayed, within `window`.
    current_index: usize,
    history_size: usize,
    preload_count: usize,
    is_loading: bool,
}

impl RandomStreamer {
    #[must_use]
    pub fn new(history_size: usize, preload_count: usize) -> Self {
        Self {
            window: Vec::new(),
            current_index: 0,
            history_size,
            preload_count,
            is_loading: false,
        }
    }

    /// Maximum window length: history behind, the current slide, and the
    /// preload ahead.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.history_size + 1 + self.preload_count
    }

    /// Seeds the stream: clears the window and requests `initial_count`
    /// entries. `None` while a fetch is already in flight.
    pub fn start(&mut self, initial_count: usize) -> Option<RandomFetch> {
        if self.is_loading || initial_count == 0 {
            return None;
        }
        self.window.clear();
        self.current_index = 0;
        self.is_loading = true;
        Some(RandomFetch {
            count: initial_count,
        })
    }

    /// Requests `count` more entries as the user nears the tail. The
    /// loading guard is what keeps a rapidly re-triggering visibility
    /// signal from issuing runaway duplicate requests.
    pub fn advance(&mut self, count: usize) -> Option<RandomFetch> {
        if self.is_loading || count == 0 {
            return None;
        }
        self.is_loading = true;
        Some(RandomFetch { count })
    }

    /// Applies a fetched batch: appends, trims overflow from the head, and
    /// recalculates the displayed index by the trimmed amount — one state
    /// update, so no observer can see the window trimmed but the index not
    /// yet adjusted. A failed fetch only clears the loading guard; the
    /// window is left intact.
    pub fn apply_batch(&mut self, result: Result<Vec<MediaEntry>>) {
        self.is_loading = false;
        let items = match result {
            Ok(items) => items,
            Err(err) => {
                log::warn!("random batch fetch failed, window kept: {err}");
                return;
            }
        };
        self.window.extend(items);
        let overflow = self.window.len().saturating_sub(self.max_len());
        if overflow > 0 {
            self.window.drain(..overflow);
            // The displayed item moved down by exactly the trimmed count;
            // never re-derive the index from content.
            self.current_index = self.current_index.saturating_sub(overflow);
        }
    }

    /// Removes every entry with the given identity, keeping the displayed
    /// index pointed at the same neighbor. Returns how many were removed.
    pub fn remove(&mut self, key: &MediaKey) -> usize {
        let removed_before_current = self
            .window
            .iter()
            .take(self.current_index)
            .filter(|item| item.key() == *key)
            .count();
        let before = self.window.len();
        self.window.retain(|item| item.key() != *key);
        self.current_index = self
            .current_index
            .saturating_sub(removed_before_current)
            .min(self.window.len().saturating_sub(1));
        before - self.window.len()
    }

    /// Updates the displayed index from the visibility tracker, clamped to
    /// the window.
    pub fn set_current(&mut self, index: usize) {
        self.current_index = index.min(self.window.len().saturating_sub(1));
    }

    #[must_use]
    pub fn window(&self) -> &[MediaEntry] {
        &self.window
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The entry currently displayed, if the window is non-empty.
    #[must_use]
    pub fn current(&self) -> Option<&MediaEntry> {
        self.window.get(self.current_index)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the user is close enough to the tail that more entries
    /// should be prefetched.
    #[must_use]
    pub fn near_tail(&self) -> bool {
        self.window.len().saturating_sub(self.current_index) <= self.preload_count
    }
}
