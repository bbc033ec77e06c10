// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios: controller + service against a scripted backend.

use futures_util::future::BoxFuture;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use vuvur::application::port::{
    GalleryListing, GalleryReply, MediaBackend, ScanProgress, ScanStatus, ViewportWatcher,
    WatchId, WatchTarget,
};
use vuvur::browse::{PageRequest, RequestState, SortKey};
use vuvur::domain::{MediaEntry, MediaKey, MediaType};
use vuvur::error::{Error, Result};
use vuvur::viewer::GestureConfig;
use vuvur::{Command, GalleryController, GalleryService};

fn image_entry(id: u64) -> MediaEntry {
    MediaEntry {
        id: Some(id),
        path: format!("/gallery/{id}.jpg"),
        media_type: MediaType::Image,
        width: 1920,
        height: 1080,
        exif: None,
    }
}

fn entries(start: u64, count: usize) -> Vec<MediaEntry> {
    (start..start + count as u64).map(image_entry).collect()
}

fn listing(items: Vec<MediaEntry>, total_pages: u32) -> Result<GalleryReply> {
    Ok(GalleryReply::Listing(GalleryListing { items, total_pages }))
}

/// Backend whose replies are queued up front, in call order.
#[derive(Default)]
struct ScriptedBackend {
    pages: Mutex<VecDeque<Result<GalleryReply>>>,
    random_batches: Mutex<VecDeque<Result<Vec<MediaEntry>>>>,
    scan_polls: Mutex<VecDeque<Result<ScanStatus>>>,
    page_requests: Mutex<Vec<PageRequest>>,
    liked: Mutex<Vec<MediaKey>>,
    deleted: Mutex<Vec<MediaKey>>,
}

impl ScriptedBackend {
    fn with_pages(pages: Vec<Result<GalleryReply>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    fn queue_scan_polls(&self, polls: Vec<Result<ScanStatus>>) {
        *self.scan_polls.lock().unwrap() = polls.into();
    }

    fn queue_random(&self, batches: Vec<Result<Vec<MediaEntry>>>) {
        *self.random_batches.lock().unwrap() = batches.into();
    }
}

impl MediaBackend for ScriptedBackend {
    fn fetch_page(&self, request: &PageRequest) -> BoxFuture<'_, Result<GalleryReply>> {
        self.page_requests.lock().unwrap().push(request.clone());
        let reply = self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Network("unscripted page fetch".into())));
        Box::pin(async move { reply })
    }

    fn fetch_random(&self, _count: usize) -> BoxFuture<'_, Result<Vec<MediaEntry>>> {
        let batch = self
            .random_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Network("unscripted random fetch".into())));
        Box::pin(async move { batch })
    }

    fn random_single(&self, _query: &str) -> BoxFuture<'_, Result<MediaEntry>> {
        Box::pin(async move { Err(Error::EmptyResult) })
    }

    fn scan_status(&self) -> BoxFuture<'_, Result<ScanStatus>> {
        let status = self
            .scan_polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ScanStatus::Complete));
        Box::pin(async move { status })
    }

    fn toggle_like(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>> {
        self.liked.lock().unwrap().push(key.clone());
        Box::pin(async move { Ok(()) })
    }

    fn delete(&self, key: &MediaKey) -> BoxFuture<'_, Result<()>> {
        self.deleted.lock().unwrap().push(key.clone());
        Box::pin(async move { Ok(()) })
    }

    fn fetch_exif(&self, _key: &MediaKey) -> BoxFuture<'_, Result<BTreeMap<String, String>>> {
        Box::pin(async move { Ok(BTreeMap::new()) })
    }
}

/// Watcher that records subscriptions so tests can address watches.
#[derive(Default)]
struct RecordingViewport {
    next_id: WatchId,
    active: Vec<(WatchId, WatchTarget)>,
}

impl RecordingViewport {
    fn id_of(&self, target: &WatchTarget) -> Option<WatchId> {
        self.active
            .iter()
            .find(|(_, t)| t == target)
            .map(|(id, _)| *id)
    }
}

impl ViewportWatcher for RecordingViewport {
    fn watch(&mut self, target: WatchTarget) -> WatchId {
        self.next_id += 1;
        self.active.push((self.next_id, target));
        self.next_id
    }

    fn cancel(&mut self, id: WatchId) {
        self.active.retain(|(watch_id, _)| *watch_id != id);
    }
}

fn controller() -> GalleryController<RecordingViewport> {
    GalleryController::new(
        RequestState::default(),
        5,
        3,
        GestureConfig::default(),
        RecordingViewport::default(),
    )
}

fn sentinel_id(ctrl: &GalleryController<RecordingViewport>) -> WatchId {
    ctrl.tracker()
        .watcher()
        .id_of(&WatchTarget::TailSentinel)
        .expect("sentinel watched")
}

#[tokio::test]
async fn sentinel_scroll_appends_the_next_page() {
    let backend = ScriptedBackend::with_pages(vec![
        listing(entries(0, 20), 5),
        listing(entries(20, 20), 5),
    ]);
    let service = GalleryService::new(backend);
    let mut ctrl = controller();

    let command = ctrl.browse_paged();
    service.execute(&mut ctrl, command).await;
    assert_eq!(ctrl.items().len(), 20);

    let command = ctrl
        .report_visibility(sentinel_id(&ctrl), 0.2)
        .expect("page 2 fetch");
    service.execute(&mut ctrl, command).await;

    assert_eq!(ctrl.items().len(), 40);
    for (i, item) in ctrl.items().iter().take(20).enumerate() {
        assert_eq!(item.id, Some(i as u64), "first page must stay in place");
    }
}

#[tokio::test]
async fn filter_change_discards_the_stale_page_in_flight() {
    let backend = ScriptedBackend::with_pages(vec![
        listing(entries(0, 20), 5),
        listing(entries(20, 20), 5), // slow page 2, superseded on arrival
        listing(entries(500, 4), 1), // fresh epoch's page 1
    ]);
    let service = GalleryService::new(backend);
    let mut ctrl = controller();

    let command = ctrl.browse_paged();
    service.execute(&mut ctrl, command).await;

    let stale = ctrl
        .report_visibility(sentinel_id(&ctrl), 0.2)
        .expect("page 2 fetch");
    let fresh = ctrl
        .set_request_state(RequestState::new(SortKey::DateDesc, "cat", 20))
        .expect("new epoch fetch");

    // The stale reply lands first and must not leak into the new epoch.
    service.execute(&mut ctrl, stale).await;
    assert!(ctrl.items().is_empty());

    service.execute(&mut ctrl, fresh).await;
    assert_eq!(ctrl.items().len(), 4);
    assert_eq!(ctrl.items()[0].id, Some(500));
}

#[tokio::test(start_paused = true)]
async fn scanning_backend_is_polled_until_the_listing_appears() {
    let backend = ScriptedBackend::with_pages(vec![
        Ok(GalleryReply::Scanning(ScanProgress {
            progress: 10,
            total: 40,
        })),
        listing(entries(0, 20), 1),
    ]);
    backend.queue_scan_polls(vec![
        Ok(ScanStatus::Scanning(ScanProgress {
            progress: 25,
            total: 40,
        })),
        Ok(ScanStatus::Complete),
    ]);
    let service = GalleryService::new(backend);
    let mut ctrl = controller();

    let command = ctrl.browse_paged();
    service.execute(&mut ctrl, command).await;

    assert!(!ctrl.scan_state().is_scanning());
    assert_eq!(ctrl.items().len(), 20);
}

#[tokio::test]
async fn like_on_the_open_slide_removes_it_and_closes_the_viewer() {
    let backend = ScriptedBackend::with_pages(vec![listing(entries(0, 3), 1)]);
    let service = GalleryService::new(backend);
    let mut ctrl = controller();

    let command = ctrl.browse_paged();
    service.execute(&mut ctrl, command).await;
    ctrl.open_viewer(1);

    let command = ctrl.like_current().expect("like command");
    assert_eq!(command, Command::ToggleLike(MediaKey::Id(1)));
    service.execute(&mut ctrl, command).await;

    assert!(ctrl.session().is_none(), "viewer must close");
    assert_eq!(ctrl.items().len(), 2);
    assert!(ctrl.items().iter().all(|e| e.id != Some(1)));
}

#[tokio::test]
async fn random_stream_stays_bounded_and_single_flighted() {
    let backend = ScriptedBackend::default();
    backend.queue_random(vec![Ok(entries(0, 9)), Ok(entries(100, 3))]);
    let service = GalleryService::new(backend);

    let mut ctrl = GalleryController::new(
        RequestState::default(),
        2, // history
        2, // preload: max window length 5
        GestureConfig::default(),
        RecordingViewport::default(),
    );
    let command = ctrl.browse_random(9).expect("initial fetch");
    service.execute(&mut ctrl, command).await;
    assert_eq!(ctrl.items().len(), 5, "window trimmed to its bound");

    let id = sentinel_id(&ctrl);
    let command = ctrl.report_visibility(id, 0.5).expect("advance fetch");
    // Re-triggering visibility while the fetch is in flight is a no-op.
    assert!(ctrl.report_visibility(id, 0.0).is_none());
    assert!(ctrl.report_visibility(id, 0.5).is_none());

    service.execute(&mut ctrl, command).await;
    assert_eq!(ctrl.items().len(), 5);
    assert_eq!(ctrl.items().last().and_then(|e| e.id), Some(102));
}

#[tokio::test]
async fn random_viewer_swipe_to_the_tail_keeps_the_stream_fed() {
    let backend = ScriptedBackend::default();
    backend.queue_random(vec![Ok(entries(0, 5)), Ok(entries(100, 2))]);
    let service = GalleryService::new(backend);

    let mut ctrl = GalleryController::new(
        RequestState::default(),
        2, // history
        2, // preload: max window length 5
        GestureConfig::default(),
        RecordingViewport::default(),
    );
    let command = ctrl.browse_random(5).expect("initial fetch");
    service.execute(&mut ctrl, command).await;
    ctrl.open_viewer(0);

    // No sentinel exists while the viewer is open; tail prefetching is
    // driven by the centered slide nearing the window's end.
    assert!(ctrl
        .tracker()
        .watcher()
        .id_of(&WatchTarget::TailSentinel)
        .is_none());

    let mut command = None;
    for index in 1..ctrl.items().len() {
        let key = ctrl.items()[index].key();
        let id = ctrl
            .tracker()
            .watcher()
            .id_of(&WatchTarget::Slide { index, key })
            .expect("slide watched");
        if let Some(issued) = ctrl.report_visibility(id, 0.9) {
            command = Some(issued);
            break;
        }
    }
    let command = command.expect("swiping to the tail must request more entries");
    service.execute(&mut ctrl, command).await;

    // The window stayed bounded and the slide being viewed survived the
    // head trim, index included.
    assert_eq!(ctrl.items().len(), 5);
    assert_eq!(ctrl.current_key(), Some(MediaKey::Id(3)));
    assert_eq!(ctrl.session().expect("open").open_index(), 1);
    assert_eq!(ctrl.items().last().and_then(|e| e.id), Some(101));
}

#[tokio::test]
async fn empty_random_search_is_a_distinct_user_visible_error() {
    let service = GalleryService::new(ScriptedBackend::default());
    let err = service.random_single("nope").await.expect_err("no match");
    assert_eq!(err, Error::EmptyResult);
    assert!(err.to_string().contains("No media found"));
}
