// SPDX-License-Identifier: MPL-2.0
//! The full-screen viewer session.
//!
//! A session exists while the slide viewer is open. It owns the centered
//! slide position, the EXIF panel flag, and the per-slide gesture states.
//! Gesture state is keyed by entry identity rather than list position, so
//! removing an item never silently hands a deleted slide's zoom state to
//! its neighbor.

use crate::domain::{MediaKey, MediaType};
use crate::viewer::gesture::{GestureConfig, GestureState};
use std::collections::HashMap;

/// State of one open slide viewer.
pub struct ViewerSession {
    open_index: usize,
    current_key: Option<MediaKey>,
    exif_visible: bool,
    gesture_config: GestureConfig,
    gestures: HashMap<MediaKey, GestureState>,
}

impl ViewerSession {
    /// Opens the viewer at a thumbnail's position.
    #[must_use]
    pub fn open_at(index: usize, key: MediaKey, gesture_config: GestureConfig) -> Self {
        Self {
            open_index: index,
            current_key: Some(key),
            exif_visible: false,
            gesture_config,
            gestures: HashMap::new(),
        }
    }

    /// Records that a different slide is now centered.
    ///
    /// The previous slide's gesture state is reset (it is no longer the
    /// centered one) and the EXIF panel is closed so information from the
    /// previous slide cannot leak onto the next.
    pub fn slide_centered(&mut self, index: usize, key: MediaKey) {
        if self.current_key.as_ref() == Some(&key) {
            self.open_index = index;
            return;
        }
        if let Some(previous) = self.current_key.take() {
            if let Some(gesture) = self.gestures.get_mut(&previous) {
                gesture.reset();
            }
        }
        self.exif_visible = false;
        self.open_index = index;
        self.current_key = Some(key);
    }

    /// The gesture state of a slide, created on first use.
    pub fn gesture_mut(&mut self, key: &MediaKey, media_type: MediaType) -> &mut GestureState {
        let config = self.gesture_config;
        self.gestures
            .entry(key.clone())
            .or_insert_with(|| GestureState::new(media_type, config))
    }

    /// Read-only view of a slide's gesture state, if it was ever touched.
    #[must_use]
    pub fn gesture(&self, key: &MediaKey) -> Option<&GestureState> {
        self.gestures.get(key)
    }

    /// Drops state belonging to a removed entry and keeps the open index
    /// pointing at the same neighbor.
    pub fn entry_removed(&mut self, key: &MediaKey, removed_index: usize) {
        self.gestures.remove(key);
        if removed_index < self.open_index {
            self.open_index -= 1;
        }
    }

    pub fn toggle_exif(&mut self) {
        self.exif_visible = !self.exif_visible;
    }

    #[must_use]
    pub fn exif_visible(&self) -> bool {
        self.exif_visible
    }

    #[must_use]
    pub fn open_index(&self) -> usize {
        self.open_index
    }

    /// Identity of the centered slide.
    #[must_use]
    pub fn current_key(&self) -> Option<&MediaKey> {
        self.current_key.as_ref()
    }

    /// Autoplay gating: only the centered slide's video should play;
    /// every other slide pauses and rewinds.
    #[must_use]
    pub fn should_play(&self, key: &MediaKey) -> bool {
        self.current_key.as_ref() == Some(key)
    }
}
