// SPDX-License-Identifier: MPL-2.0
//! Backend-driven item collections: paginated loading and random streaming.

pub mod page_loader;
pub mod random_stream;
pub mod request;

pub use page_loader::{PageFetch, PageLoader, ScanState};
pub use random_stream::{RandomFetch, RandomStreamer};
pub use request::{PageRequest, RequestState, SortKey};
