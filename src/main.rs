use crate::app_config::AppConfig;
use crate::console::{ConsolePermissions, TerminalView};
use crate::gpsd::GpsdProvider;
use crate::nominatim::NominatimGeocoder;
use crate::presenter::LocationPresenter;
use std::sync::Arc;
use tracing::{info, warn};

mod app_config;
mod console;
mod domain;
mod extensions;
mod gpsd;
mod nominatim;
mod presenter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout belongs to the view
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = nominatim::new_client(&config)?;
    let geocoder = Arc::new(NominatimGeocoder::new(client, config.geocoder().url()));
    let provider = Arc::new(GpsdProvider::new(&config));
    let permissions = Arc::new(ConsolePermissions::new(&config));

    let view = TerminalView::new();
    view.redraw();

    let mut presenter = LocationPresenter::new(
        provider,
        permissions,
        geocoder,
        view.fields(),
        config.gpsd().provider(),
        config.core().event_buffer_size(),
    );
    presenter.ensure_permission().await;
    if !presenter.is_subscribed() {
        warn!("⚠️ Not receiving location updates, permission is {:?}", presenter.permission_state());
    }

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    presenter
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("⚠️ Unable to listen for Ctrl-C: {}", e);
            }
        })
        .await;

    info!("👋 Stopped {}", env!("CARGO_PKG_NAME"));
    Ok(())
}
