use aquamap::prelude::*;
use aquamap::runtime::spawners::tokio_impl::TokioSpawner;
use std::time::Duration;

/// Optional fixed position standing in for device geolocation, as `"lat,lng"`
const FIXED_LOCATION_ENV: &str = "AQUAMAP_FIXED_LOCATION";

/// Headless session: activates the view, locates, searches and logs what a
/// map surface would draw.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    aquamap::init_logging();
    init_runtime(Box::new(TokioSpawner::new(tokio::runtime::Handle::current())));

    let config = ClientConfig::from_env()?;
    log::info!("partner service at {}", config.api_base_url);

    let geolocation: Arc<dyn GeolocationAdapter> = match std::env::var(FIXED_LOCATION_ENV) {
        Ok(raw) => Arc::new(FixedGeolocation::new(raw.parse::<LatLng>()?)),
        Err(_) => Arc::new(NoGeolocation),
    };

    let session = SessionBuilder::new()
        .with_config(config)
        .with_geolocation(geolocation)
        .with_surface(Arc::new(LogSurface))
        .build()?;

    let feed = session.dispatch(MapEvent::ViewActivated)?;
    session.on_locate_requested().await;

    match session.on_search_requested().await {
        SyncOutcome::Applied { count, .. } => log::info!("{count} partners nearby"),
        SyncOutcome::Failed { .. } => {
            if let Some(message) = session.error_message() {
                eprintln!("{message}");
            }
        }
        other => log::debug!("search ended as {other:?}"),
    }

    for marker in session.markers() {
        println!("{}\n  {}", marker.popup_text(), marker.directions_url);
    }

    // The feed is non-critical; give it a moment and move on
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !feed.is_finished() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    for item in session.announcements() {
        println!("* {} - {}", item.title, item.content);
    }

    Ok(())
}
