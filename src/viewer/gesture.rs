// SPDX-License-Identifier: MPL-2.0
//! Per-slide pointer/touch gesture state machine.
//!
//! Mouse and touch input funnel through the same coordinate-generic
//! handlers. A press-and-release that stays under the drag threshold is a
//! tap and toggles zoom; once the threshold is exceeded the interaction is
//! a pan and the release leaves the zoom state alone. Only images zoom and
//! pan; for videos the handlers are attached but gated off so clicks fall
//! through to the native player controls.

use crate::config::defaults::{DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_ZOOM_LEVEL};
use crate::domain::MediaType;

/// A point or offset in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The zoom/pan transform a renderer should apply to the slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// 1.0 when not zoomed, the configured zoom scale otherwise.
    pub scale: f32,
    /// Pan offset in pixels. Always (0,0) when not zoomed.
    pub pan: Point,
}

/// Gesture tunables. The zoom scale comes from configuration and is never
/// hard-coded; anything at or below 1.0 would make tap-to-zoom a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub zoom_scale: f32,
    /// Minimum pointer displacement, in pixels, classifying the
    /// interaction as a pan rather than a tap.
    pub drag_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            zoom_scale: DEFAULT_ZOOM_LEVEL,
            drag_threshold: DEFAULT_DRAG_THRESHOLD_PX,
        }
    }
}

/// Gesture state of one slide.
///
/// Created on slide mount, keyed by the entry's identity, and reset
/// whenever the slide stops being the centered one.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    media_type: MediaType,
    config: GestureConfig,
    zoomed: bool,
    dragging: bool,
    pointer_start: Point,
    pan_start: Point,
    pan: Point,
    threshold_exceeded: bool,
}

impl GestureState {
    #[must_use]
    pub fn new(media_type: MediaType, config: GestureConfig) -> Self {
        Self {
            media_type,
            config,
            zoomed: false,
            dragging: false,
            pointer_start: Point::default(),
            pan_start: Point::default(),
            pan: Point::default(),
            threshold_exceeded: false,
        }
    }

    /// Pointer (mouse or single touch) pressed at viewport coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.threshold_exceeded = false;
        self.pointer_start = Point::new(x, y);
        self.pan_start = self.pan;
    }

    /// Pointer moved. While a zoomed image is held, the pan offset follows
    /// the pointer: `pan = pan_start + (current - pointer_start)`.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let dx = x - self.pointer_start.x;
        let dy = y - self.pointer_start.y;
        if dx.abs() > self.config.drag_threshold || dy.abs() > self.config.drag_threshold {
            self.threshold_exceeded = true;
        }
        if self.zoomed && self.media_type.is_image() {
            self.pan = Point::new(self.pan_start.x + dx, self.pan_start.y + dy);
        }
    }

    /// Pointer released. A tap (threshold never exceeded) toggles zoom;
    /// zooming out resets the pan so no stale offset survives. A pan
    /// release keeps both zoom and pan.
    pub fn pointer_up(&mut self) {
        if !self.threshold_exceeded && self.media_type.is_image() {
            self.zoomed = !self.zoomed;
            if !self.zoomed {
                self.pan = Point::default();
            }
        }
        self.dragging = false;
        self.threshold_exceeded = false;
    }

    /// Pointer left the slide or the touch was cancelled.
    pub fn pointer_cancel(&mut self) {
        self.dragging = false;
        self.threshold_exceeded = false;
    }

    /// Resets to the unzoomed state. Called when the slide stops being
    /// the centered one.
    pub fn reset(&mut self) {
        self.zoomed = false;
        self.dragging = false;
        self.threshold_exceeded = false;
        self.pan = Point::default();
        self.pan_start = Point::default();
    }

    /// Whether touch-move events should be cancelled to suppress page
    /// scrolling: only while actively panning a zoomed image, never
    /// otherwise, so swipe-to-advance keeps working.
    #[must_use]
    pub fn captures_scroll(&self) -> bool {
        self.dragging && self.zoomed && self.media_type.is_image()
    }

    /// The transform the renderer should apply.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            scale: if self.zoomed { self.config.zoom_scale } else { 1.0 },
            pan: self.pan,
        }
    }

    #[must_use]
    pub fn zoomed(&self) -> bool {
        self.zoomed
    }

    #[must_use]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        self.pan
    }
}
