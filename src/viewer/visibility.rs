// SPDX-License-Identifier: MPL-2.0
//! Visibility-driven tracking of the tail sentinel and the centered slide.
//!
//! [`VisibilityTracker`] sits on top of a [`ViewportWatcher`] port and is
//! used in two modes: watching a single tail sentinel whose entry into the
//! viewport means "load more", and watching every slide in the viewer to
//! decide which one is centered. Whenever the tracked element set changes,
//! the tracker cancels all watches and re-observes the new set; reports
//! against cancelled ids are ignored, so stale observations on removed
//! elements can never fire.

use crate::application::port::{ViewportWatcher, WatchId, WatchTarget};
use crate::config::defaults::SLIDE_VISIBILITY_THRESHOLD;
use crate::domain::MediaKey;

/// Event emitted by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibilityEvent {
    /// The tail sentinel entered the viewport.
    SentinelEntered,
    /// A different slide now best satisfies the centering threshold.
    SlideCentered { index: usize, key: MediaKey },
}

struct Watch {
    id: WatchId,
    target: WatchTarget,
    /// Last reported fraction of the element inside the root.
    ratio: f32,
}

/// Tracks which observed element satisfies its visibility threshold.
pub struct VisibilityTracker<W: ViewportWatcher> {
    watcher: W,
    watches: Vec<Watch>,
    /// Index (into the slide set) of the slide currently considered
    /// centered. `None` in sentinel mode.
    centered: Option<usize>,
}

impl<W: ViewportWatcher> VisibilityTracker<W> {
    #[must_use]
    pub fn new(watcher: W) -> Self {
        Self {
            watcher,
            watches: Vec::new(),
            centered: None,
        }
    }

    /// Switches to tail-sentinel mode: one element, any intersection
    /// triggers.
    pub fn observe_sentinel(&mut self) {
        self.disconnect();
        let id = self.watcher.watch(WatchTarget::TailSentinel);
        self.watches.push(Watch {
            id,
            target: WatchTarget::TailSentinel,
            ratio: 0.0,
        });
    }

    /// Switches to slide mode, observing every slide of the given set.
    /// Must be called again whenever the set changes (items appended or
    /// removed); the previous watches are cancelled first.
    pub fn observe_slides(&mut self, keys: &[MediaKey]) {
        self.disconnect();
        for (index, key) in keys.iter().enumerate() {
            let target = WatchTarget::Slide {
                index,
                key: key.clone(),
            };
            let id = self.watcher.watch(target.clone());
            self.watches.push(Watch {
                id,
                target,
                ratio: 0.0,
            });
        }
    }

    /// Cancels every active watch.
    pub fn disconnect(&mut self) {
        for watch in self.watches.drain(..) {
            self.watcher.cancel(watch.id);
        }
        self.centered = None;
    }

    /// Feeds one visibility report from the embedder.
    ///
    /// Reports for unknown (cancelled) ids are dropped. In sentinel mode
    /// an event fires on the rising edge of any intersection; in slide
    /// mode the slide that most closely satisfies the
    /// [`SLIDE_VISIBILITY_THRESHOLD`] becomes centered, and an event fires
    /// only when that changes.
    pub fn report(&mut self, id: WatchId, ratio: f32) -> Option<VisibilityEvent> {
        let watch = self.watches.iter_mut().find(|w| w.id == id)?;
        let was_visible = watch.ratio > 0.0;
        watch.ratio = ratio;

        match &watch.target {
            WatchTarget::TailSentinel => {
                (ratio > 0.0 && !was_visible).then_some(VisibilityEvent::SentinelEntered)
            }
            WatchTarget::Slide { .. } => self.recompute_centered(),
        }
    }

    fn recompute_centered(&mut self) -> Option<VisibilityEvent> {
        let best = self
            .watches
            .iter()
            .filter(|w| w.ratio >= SLIDE_VISIBILITY_THRESHOLD)
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))?;
        let WatchTarget::Slide { index, key } = &best.target else {
            return None;
        };
        if self.centered == Some(*index) {
            return None;
        }
        let event = VisibilityEvent::SlideCentered {
            index: *index,
            key: key.clone(),
        };
        self.centered = Some(*index);
        Some(event)
    }

    /// The currently centered slide index, if any.
    #[must_use]
    pub fn centered(&self) -> Option<usize> {
        self.centered
    }

    /// The underlying watcher, for embedders that wire watch ids to
    /// rendered elements.
    #[must_use]
    pub fn watcher(&self) -> &W {
        &self.watcher
    }
}
