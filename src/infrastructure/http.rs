// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the gallery backend API.
//!
//! Implements [`MediaBackend`] over the backend's JSON endpoints. The
//! gallery listing endpoint answers with either a page of items or, while
//! the library index is being rebuilt, a scan-progress payload; both are
//! decoded from the same response body. Mutating actions are addressed by
//! server id, so entries the backend delivered without one cannot be liked
//! or deleted.

use crate::application::port::{
    GalleryListing, GalleryReply, MediaBackend, ScanProgress, ScanStatus,
};
use crate::browse::PageRequest;
use crate::domain::{MediaEntry, MediaKey};
use crate::error::{Error, Result};
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Gallery backend reached over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Wire shape of the gallery listing endpoint. A backend mid-scan answers
/// with progress instead of items.
#[derive(Deserialize)]
#[serde(untagged)]
enum GalleryPayload {
    Listing {
        items: Vec<MediaEntry>,
        total_pages: u32,
    },
    Scanning {
        #[serde(default)]
        progress: u64,
        #[serde(default)]
        total: u64,
    },
}

/// Wire shape of the scan status endpoint.
#[derive(Deserialize)]
struct ScanStatusPayload {
    scan_complete: bool,
    #[serde(default)]
    progress: u64,
    #[serde(default)]
    total: u64,
}

impl HttpBackend {
    /// Creates a backend adapter for the given base URL
    /// (e.g. `http://localhost:8000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resolves the id an action endpoint needs. Path-only identities have
    /// no server-side address.
    fn action_id(key: &MediaKey, action: &str) -> Result<u64> {
        key.as_id()
            .ok_or_else(|| Error::Network(format!("cannot {action} {key}: entry has no server id")))
    }

    async fn post_action(&self, path: String) -> Result<()> {
        self.client
            .post(self.url(&path))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl MediaBackend for HttpBackend {
    fn fetch_page(&self, request: &PageRequest) -> BoxFuture<'_, Result<GalleryReply>> {
        let query = [
            ("sort", request.sort.query_value().to_string()),
            ("q", request.query.clone()),
            ("page", request.page.to_string()),
            ("limit", request.page_size.to_string()),
        ];
        Box::pin(async move {
            let payload: GalleryPayload = self
                .client
                .get(self.url("/api/gallery"))
                .query(&query)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok(match payload {
                GalleryPayload::Listing { items, total_pages } => {
                    GalleryReply::Listing(GalleryListing { items, total_pages })
                }
                GalleryPayload::Scanning { progress, total } => {
                    GalleryReply::Scanning(ScanProgress { progress, total })
                }
            })
        })
    }

    fn fetch_random(&self, count: usize) -> BoxFuture<'_, Result<Vec<MediaEntry>>> {
        Box::pin(async move {
            let items = self
                .client
                .get(self.url("/api/files/random"))
                .query(&[("count", count.to_string())])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok(items)
        })
    }

    fn random_single(&self, query: &str) -> BoxFuture<'_, Result<MediaEntry>> {
        let query = query.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("/api/random-single"))
                .query(&[("q", query)])
                .send()
                .await?;
            // The backend answers 404 when nothing matched the query.
            if response.status() == StatusCode::NOT_FOUND {
                return Err(Error::EmptyResult);
            }
            Ok(response.error_for_status()?.json().await?)
        })
    }

    fn scan_status(&self) -> BoxFuture<'_, Result<ScanStatus>> {
        Box::pin(async move {
            let payload: ScanStatusPayload = self
                .client
                .get(self.url("/api/scan/status"))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok(if payload.scan_complete {
                ScanStatus::Complete
            } else {
                ScanStatus::Scanning(ScanProgress {
                    progress: payload.progress,
                    total: payload.total,
                })
            })
        })
    }

    fn toggle_like(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>> {
        let id = Self::action_id(key, "like");
        Box::pin(async move { self.post_action(format!("/api/toggle_like/{}", id?)).await })
    }

    fn delete(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>> {
        let id = Self::action_id(key, "delete");
        Box::pin(async move { self.post_action(format!("/api/delete/{}", id?)).await })
    }

    fn fetch_exif(&self, key: &MediaKey) -> BoxFuture<'_, Result<BTreeMap<String, String>>> {
        let id = Self::action_id(key, "fetch exif for");
        Box::pin(async move {
            let exif = self
                .client
                .get(self.url(&format!("/api/exif/{}", id?)))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok(exif)
        })
    }
}
