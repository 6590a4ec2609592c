use crate::domain::display::DisplayFields;
use crate::domain::events::{LocationEvent, ProviderStatus};
use crate::domain::geocoder::ReverseGeocoder;
use crate::domain::permission::{PermissionKind, PermissionResult, PermissionState, PermissionSystem};
use crate::domain::provider::{LocationProvider, Subscription};
use crate::domain::{PositionSample, ResolvedAddress};
use crate::extensions::float_ext::DecimalString;
use crate::presenter::PresenterError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error, info, instrument, trace, warn};

/// Every fix is delivered, however frequent or close to the previous one.
const MIN_UPDATE_TIME: Duration = Duration::ZERO;
const MIN_UPDATE_DISTANCE_M: f64 = 0.0;
const MAX_ADDRESS_RESULTS: usize = 1;

/// Turns location events of a single provider into text on the display fields.
///
/// All handlers run on the task that calls [`LocationPresenter::run`]. An address lookup is awaited within the turn
/// of the event that triggered it, so a slow geocoder delays the next event.
#[derive(Debug)]
pub struct LocationPresenter {
    provider: Arc<dyn LocationProvider>,
    permissions: Arc<dyn PermissionSystem>,
    geocoder: Arc<dyn ReverseGeocoder>,
    display: DisplayFields,
    provider_id: String,
    permission: PermissionState,
    subscription: Option<Subscription>,
    events_tx: Sender<LocationEvent>,
    events_rx: Receiver<LocationEvent>,
}

impl LocationPresenter {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        permissions: Arc<dyn PermissionSystem>,
        geocoder: Arc<dyn ReverseGeocoder>,
        display: DisplayFields,
        provider_id: impl Into<String>,
        event_buffer_size: usize,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(event_buffer_size);

        LocationPresenter {
            provider,
            permissions,
            geocoder,
            display,
            provider_id: provider_id.into(),
            permission: PermissionState::NotRequested,
            subscription: None,
            events_tx,
            events_rx,
        }
    }

    pub fn permission_state(&self) -> PermissionState {
        self.permission
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribes once location access is granted, prompting the user if needed. A denial is final for the session.
    #[instrument(skip(self))]
    pub async fn ensure_permission(&mut self) {
        match self.permission {
            PermissionState::Denied => {
                debug!("🔐 Location permission was denied earlier, not asking again");
                return;
            }
            PermissionState::Requested => return,
            PermissionState::NotRequested | PermissionState::Granted => {}
        }

        if !self.permissions.has_runtime_model() || self.permissions.check_permission(PermissionKind::FineLocation) {
            self.permission = PermissionState::Granted;
            self.subscribe().await;
            return;
        }

        self.permission = PermissionState::Requested;
        info!("🔐 Requesting location permission...");
        let result = self
            .permissions
            .request_permission(PermissionKind::FineLocation)
            .await
            .unwrap_or_else(|e| {
                warn!("⚠️ {}", e);
                PermissionResult::Denied
            });

        self.on_permission_result(result).await;
    }

    pub async fn on_permission_result(&mut self, result: PermissionResult) {
        match result {
            PermissionResult::Granted => {
                info!("🔐 Requesting location permission... OK");
                self.permission = PermissionState::Granted;
                self.subscribe().await;
            }
            PermissionResult::Denied => {
                self.permission = PermissionState::Denied;
                warn!("⚠️ {}", PresenterError::PermissionDenied);
            }
        }
    }

    /// Registers for every fix of the provider and shows its last known fix right away. Subscribing again replaces
    /// the active subscription.
    #[instrument(skip(self), fields(provider = %self.provider_id))]
    pub async fn subscribe(&mut self) {
        if let Some(previous) = self.subscription.take() {
            debug!("📍 Replacing the active subscription to '{}'", previous.provider());
            previous.cancel();
        }

        info!("📍 Subscribing to location updates...");
        let subscription = self
            .provider
            .request_updates(&self.provider_id, MIN_UPDATE_TIME, MIN_UPDATE_DISTANCE_M, self.events_tx.clone())
            .await;

        match subscription {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(e) => {
                error!("❌ Subscribing to location updates... failed: {}", e);
                return;
            }
        }
        info!("📍 Subscribing to location updates... OK");

        match self.provider.last_known_location(&self.provider_id).await {
            Ok(Some(sample)) => self.on_location_changed(&sample).await,
            Ok(None) => debug!("📍 No last known location yet"),
            Err(e) => warn!("⚠️ Unable to get the last known location: {}", e),
        }
    }

    /// Handles events until `shutdown` completes. Events that are already queued are handled first.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                Some(event) = self.events_rx.recv() => self.handle(event).await,
                _ = &mut shutdown => break,
            }
        }
    }

    pub async fn handle(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::LocationChanged(sample) => self.on_location_changed(&sample).await,
            LocationEvent::StatusChanged { provider, status } => self.on_status_changed(&provider, status),
            LocationEvent::ProviderEnabled(provider) => self.on_provider_enabled(&provider),
            LocationEvent::ProviderDisabled(provider) => self.on_provider_disabled(&provider),
        }
    }

    /// Shows the coordinates of `sample` and, if one can be found, its address. A failed lookup keeps the address
    /// that is currently shown.
    pub async fn on_location_changed(&self, sample: &PositionSample) {
        info!(
            provider = sample.provider(),
            time = ?sample.time(),
            "📍 Location changed: {}, {}",
            sample.latitude(),
            sample.longitude()
        );

        let display = &self.display;
        display.latitude.set_text(&format!("Latitude: {}", sample.latitude().to_decimal_string()));
        display.longitude.set_text(&format!("Longitude: {}", sample.longitude().to_decimal_string()));
        display.altitude.set_text(&format!("Altitude: {}", sample.altitude().unwrap_or_default().to_decimal_string()));
        display.accuracy.set_text(&format!("Accuracy: {}", sample.accuracy().unwrap_or_default().to_decimal_string()));

        match self.resolve_address(sample).await {
            Ok(Some(address)) => {
                debug!(?address, "🏠 Place found");
                display.address.set_text(&address.to_display_text());
            }
            Ok(None) => debug!("🏠 No address found"),
            Err(e) => warn!("⚠️ {}", e),
        }
    }

    async fn resolve_address(&self, sample: &PositionSample) -> Result<Option<ResolvedAddress>, PresenterError> {
        let addresses = self
            .geocoder
            .resolve(sample.latitude(), sample.longitude(), MAX_ADDRESS_RESULTS)
            .await?;
        Ok(addresses.into_iter().next())
    }

    pub fn on_status_changed(&self, provider: &str, status: ProviderStatus) {
        trace!(provider, ?status, "Provider status changed");
    }

    pub fn on_provider_enabled(&self, provider: &str) {
        trace!(provider, "Provider enabled");
    }

    pub fn on_provider_disabled(&self, provider: &str) {
        trace!(provider, "Provider disabled");
    }
}
