// SPDX-License-Identifier: MPL-2.0
//! Slide-viewer state: visibility tracking, gestures, and the session.

pub mod gesture;
pub mod session;
pub mod visibility;

pub use gesture::{GestureConfig, GestureState, Point, Transform};
pub use session::ViewerSession;
pub use visibility::{VisibilityEvent, VisibilityTracker};
