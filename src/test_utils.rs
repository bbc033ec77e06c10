// SPDX-License-Identifier: MPL-2.0
//! Shared builders and fakes for unit tests.

use crate::application::port::{ViewportWatcher, WatchId, WatchTarget};
use crate::domain::{MediaEntry, MediaType};

/// An image entry with the given server id.
pub fn image_entry(id: u64) -> MediaEntry {
    MediaEntry {
        id: Some(id),
        path: format!("/gallery/{id}.jpg"),
        media_type: MediaType::Image,
        width: 1920,
        height: 1080,
        exif: None,
    }
}

/// A video entry with the given server id.
pub fn video_entry(id: u64) -> MediaEntry {
    MediaEntry {
        id: Some(id),
        path: format!("/gallery/{id}.mp4"),
        media_type: MediaType::Video,
        width: 1280,
        height: 720,
        exif: None,
    }
}

/// `count` image entries with ids starting at `start`.
pub fn entries(start: u64, count: usize) -> Vec<MediaEntry> {
    (start..start + count as u64).map(image_entry).collect()
}

/// Manual-trigger [`ViewportWatcher`]: records watches, never fires on its
/// own. Tests feed ratios through the tracker's `report` directly.
#[derive(Default)]
pub struct ManualViewport {
    next_id: WatchId,
    active: Vec<(WatchId, WatchTarget)>,
}

impl ManualViewport {
    /// Targets currently watched, in subscription order.
    pub fn active_targets(&self) -> Vec<WatchTarget> {
        self.active.iter().map(|(_, target)| target.clone()).collect()
    }

    /// The watch id assigned to a target, if it is being watched.
    pub fn id_of(&self, target: &WatchTarget) -> Option<WatchId> {
        self.active
            .iter()
            .find(|(_, t)| t == target)
            .map(|(id, _)| *id)
    }
}

impl ViewportWatcher for ManualViewport {
    fn watch(&mut self, target: WatchTarget) -> WatchId {
        self.next_id += 1;
        self.active.push((self.next_id, target));
        self.next_id
    }

    fn cancel(&mut self, id: WatchId) {
        self.active.retain(|(watch_id, _)| *watch_id != id);
    }
}
