// SPDX-License-Identifier: MPL-2.0
//! Command-line probe for a gallery backend.
//!
//! Connects to a running backend, runs one listing (or random search)
//! through the engine, and prints the result. Mainly useful for checking a
//! deployment and the engine's wiring without a browser shell.

use vuvur::application::port::{ViewportWatcher, WatchId, WatchTarget};
use vuvur::browse::{RequestState, SortKey};
use vuvur::config::{self, EnvOverrides, Settings};
use vuvur::error::Error;
use vuvur::infrastructure::HttpBackend;
use vuvur::viewer::GestureConfig;
use vuvur::{GalleryController, GalleryService};

/// No elements are rendered here, so visibility never fires.
struct InertViewport;

impl ViewportWatcher for InertViewport {
    fn watch(&mut self, _target: WatchTarget) -> WatchId {
        0
    }

    fn cancel(&mut self, _id: WatchId) {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> vuvur::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let server: String = opt(&mut args, "--server")?
        .unwrap_or_else(|| "http://localhost:8000".into());
    let sort: Option<String> = opt(&mut args, "--sort")?;
    let query: String = opt(&mut args, "--query")?.unwrap_or_default();
    let random_single = args.contains("--random");

    let stored = config::load()?;
    let settings = Settings::resolve(&EnvOverrides::from_env(), &stored);

    let service = GalleryService::new(HttpBackend::new(server));

    if random_single {
        let entry = service.random_single(&query).await?;
        println!("{}", entry.path);
        return Ok(());
    }

    let sort = match sort.as_deref() {
        Some(value) => SortKey::from_query_value(value)
            .ok_or_else(|| Error::Config(format!("unknown sort key: {value}")))?,
        None => SortKey::default(),
    };
    let request = RequestState::new(sort, query, settings.page_size.value);

    let mut controller = GalleryController::new(
        request,
        settings.history_size.value,
        settings.preload_count.value,
        GestureConfig {
            zoom_scale: settings.zoom_level.value,
            ..GestureConfig::default()
        },
        InertViewport,
    );
    // Waits out a running library scan: the service polls the status and
    // refetches once the index is ready.
    let command = controller.browse_paged();
    service.execute(&mut controller, command).await;

    for item in controller.items() {
        println!("{}", item.path);
    }
    Ok(())
}

fn opt(args: &mut pico_args::Arguments, name: &'static str) -> vuvur::Result<Option<String>> {
    args.opt_value_from_str(name)
        .map_err(|err| Error::Config(err.to_string()))
}
