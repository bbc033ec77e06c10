// SPDX-License-Identifier: MPL-2.0
//! Request-state types for the paginated gallery listing.

use serde::{Deserialize, Serialize};

/// Server-side ordering of the gallery listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Random,
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// Wire value for the `sort` query parameter.
    #[must_use]
    pub fn query_value(self) -> &'static str {
        match self {
            SortKey::Random => "random",
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
        }
    }

    /// Parses a wire value back into a sort key.
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "random" => Some(SortKey::Random),
            "date_desc" => Some(SortKey::DateDesc),
            "date_asc" => Some(SortKey::DateAsc),
            "name_asc" => Some(SortKey::NameAsc),
            "name_desc" => Some(SortKey::NameDesc),
            _ => None,
        }
    }
}

/// The canonical listing request state. A change to any field supersedes
/// the previous epoch: the item collection is invalidated and paging
/// restarts at page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    pub sort: SortKey,
    /// Filter over filename and EXIF data. Callers should debounce rapid
    /// input by [`crate::config::defaults::FILTER_DEBOUNCE`] before
    /// submitting.
    pub query: String,
    pub page_size: u32,
}

impl RequestState {
    #[must_use]
    pub fn new(sort: SortKey, query: impl Into<String>, page_size: u32) -> Self {
        Self {
            sort,
            query: query.into(),
            page_size,
        }
    }

    /// The concrete request for one page of this state.
    #[must_use]
    pub fn page(&self, page: u32) -> PageRequest {
        debug_assert!(page >= 1);
        PageRequest {
            page,
            sort: self.sort,
            query: self.query.clone(),
            page_size: self.page_size,
        }
    }
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            sort: SortKey::Random,
            query: String::new(),
            page_size: crate::config::defaults::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One concrete page fetch, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub sort: SortKey,
    pub query: String,
    pub page_size: u32,
}
