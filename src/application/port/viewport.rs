// SPDX-License-Identifier: MPL-2.0
//! Viewport visibility port definition.
//!
//! The concrete visibility primitive (an intersection observer in a
//! browser shell, a scroll-offset calculation in a native one) lives
//! behind [`ViewportWatcher`], so the tracking logic can be unit tested
//! with a manual-trigger fake.

use crate::domain::MediaKey;

/// Handle identifying one active watch. Reports against a cancelled id
/// must be ignored by the consumer.
pub type WatchId = u64;

/// What a watch is attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchTarget {
    /// The element near the end of the rendered list whose entry into the
    /// viewport signals "load more".
    TailSentinel,
    /// One full-screen slide in the viewer, identified by its entry.
    Slide { index: usize, key: MediaKey },
}

/// Port for observing element visibility inside a scrollable root.
///
/// The embedder wires each watched target to its rendered element and
/// feeds visibility ratios back into
/// [`crate::viewer::VisibilityTracker::report`] under the returned id.
pub trait ViewportWatcher {
    /// Starts observing a target, returning its watch id.
    fn watch(&mut self, target: WatchTarget) -> WatchId;

    /// Stops observing. The embedder must drop its element subscription so
    /// stale observations on removed elements never fire.
    fn cancel(&mut self, id: WatchId);
}
