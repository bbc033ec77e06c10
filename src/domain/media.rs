// SPDX-License-Identifier: MPL-2.0
//! Media entry types as delivered by the gallery backend.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Whether an entry is a still image or a video.
///
/// Only images support tap-to-zoom and panning; pointer events over videos
/// fall through to the native player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Returns `true` for still images.
    #[must_use]
    pub fn is_image(self) -> bool {
        matches!(self, MediaType::Image)
    }
}

/// One media file as reported by the backend.
///
/// Immutable once fetched; the only list mutation is optimistic removal
/// after a successful like or delete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaEntry {
    /// Server-assigned identifier. Identity falls back to `path` when the
    /// backend does not provide one.
    #[serde(default)]
    pub id: Option<u64>,
    pub path: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// EXIF tags, when the backend embeds them in the listing.
    #[serde(default)]
    pub exif: Option<BTreeMap<String, String>>,
}

impl MediaEntry {
    /// Returns the stable identity of this entry: `id` when the backend
    /// assigned one, else the path.
    #[must_use]
    pub fn key(&self) -> MediaKey {
        match self.id {
            Some(id) => MediaKey::Id(id),
            None => MediaKey::Path(self.path.clone()),
        }
    }
}

/// Stable identity of a media entry.
///
/// List operations (removal, gesture-state keying) go through this type so
/// that splicing the item collection never reassigns per-slide state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKey {
    Id(u64),
    Path(String),
}

impl MediaKey {
    /// Returns the server-assigned id, if this identity carries one.
    /// Backend actions (like, delete, exif lookup) are addressed by id.
    #[must_use]
    pub fn as_id(&self) -> Option<u64> {
        match self {
            MediaKey::Id(id) => Some(*id),
            MediaKey::Path(_) => None,
        }
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKey::Id(id) => write!(f, "{id}"),
            MediaKey::Path(path) => write!(f, "{path}"),
        }
    }
}
