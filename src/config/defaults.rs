// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for default values used across
//! the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Paging**: gallery page size bounds
//! - **Random stream**: preload and history window bounds
//! - **Gestures**: zoom scale and drag threshold bounds
//! - **Timing**: scan poll cadence and filter debounce

use std::time::Duration;

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// Default number of items requested per gallery page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Minimum allowed page size.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u32 = 500;

// ==========================================================================
// Random Stream Defaults
// ==========================================================================

/// Default number of items fetched ahead of the current slide.
pub const DEFAULT_PRELOAD_COUNT: usize = 3;

/// Maximum preload count.
pub const MAX_PRELOAD_COUNT: usize = 50;

/// Default number of already-seen items retained behind the current slide.
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// Maximum history size.
pub const MAX_HISTORY_SIZE: usize = 200;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Default tap-to-zoom scale factor.
pub const DEFAULT_ZOOM_LEVEL: f32 = 2.5;

/// Minimum zoom scale factor. Anything below this is indistinguishable
/// from the unzoomed state.
pub const MIN_ZOOM_LEVEL: f32 = 1.1;

/// Maximum zoom scale factor.
pub const MAX_ZOOM_LEVEL: f32 = 10.0;

/// Default pointer displacement, in pixels, that classifies an interaction
/// as a drag rather than a tap.
pub const DEFAULT_DRAG_THRESHOLD_PX: f32 = 10.0;

/// Minimum drag threshold.
pub const MIN_DRAG_THRESHOLD_PX: f32 = 1.0;

/// Maximum drag threshold.
pub const MAX_DRAG_THRESHOLD_PX: f32 = 30.0;

// ==========================================================================
// Visibility Defaults
// ==========================================================================

/// Fraction of a slide's area that must be inside the scroll root for the
/// slide to be considered the centered one.
pub const SLIDE_VISIBILITY_THRESHOLD: f32 = 0.7;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Interval between scan-status polls while the backend is indexing.
pub const SCAN_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Recommended debounce for filter-query input before it reaches
/// [`crate::browse::PageLoader::set_request_state`].
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Paging validation
    assert!(MIN_PAGE_SIZE > 0);
    assert!(DEFAULT_PAGE_SIZE >= MIN_PAGE_SIZE);
    assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);

    // Random stream validation
    assert!(DEFAULT_PRELOAD_COUNT <= MAX_PRELOAD_COUNT);
    assert!(DEFAULT_HISTORY_SIZE <= MAX_HISTORY_SIZE);

    // Gesture validation
    assert!(MIN_ZOOM_LEVEL > 1.0);
    assert!(DEFAULT_ZOOM_LEVEL >= MIN_ZOOM_LEVEL);
    assert!(DEFAULT_ZOOM_LEVEL <= MAX_ZOOM_LEVEL);
    assert!(MIN_DRAG_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_DRAG_THRESHOLD_PX >= MIN_DRAG_THRESHOLD_PX);
    assert!(DEFAULT_DRAG_THRESHOLD_PX <= MAX_DRAG_THRESHOLD_PX);

    // Visibility validation
    assert!(SLIDE_VISIBILITY_THRESHOLD > 0.0);
    assert!(SLIDE_VISIBILITY_THRESHOLD <= 1.0);
};
