use crate::app_config::AppConfig;
use crate::domain::PositionSample;
use crate::domain::events::{LocationEvent, ProviderStatus};
use crate::domain::provider::{LocationProvider, ProviderError, Subscription, UpdateFilter};
use crate::gpsd::report::{Device, Report};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::SendError;
use tokio::time::timeout;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, info, instrument, trace, warn};

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";
const POLL_COMMAND: &[u8] = b"?POLL;\n";

/// Location provider backed by a gpsd daemon, publishing its fixes under a single provider name.
#[derive(Clone, Debug)]
pub struct GpsdProvider {
    address: String,
    provider: String,
    poll_timeout: Duration,
    retry_ms: u64,
    retry_max_delay: Duration,
}

impl GpsdProvider {
    pub fn new(config: &AppConfig) -> Self {
        let gpsd = config.gpsd();
        GpsdProvider {
            address: gpsd.address(),
            provider: gpsd.provider().to_string(),
            poll_timeout: gpsd.poll_timeout(),
            retry_ms: gpsd.retry_ms(),
            retry_max_delay: gpsd.retry_max_delay(),
        }
    }

    fn ensure_provider(&self, provider_id: &str) -> Result<(), ProviderError> {
        if provider_id != self.provider {
            return Err(ProviderError::UnknownProvider(provider_id.to_string()));
        }
        Ok(())
    }

    async fn poll(&self) -> Result<Option<PositionSample>, ProviderError> {
        let mut stream = watch(&self.address).await?;
        stream.write_all(POLL_COMMAND).await?;

        let mut lines = LinesStream::new(BufReader::new(stream).lines());
        while let Some(line) = lines.next().await {
            let line = line?;
            match serde_json::from_str::<Report>(&line) {
                Ok(Report::Poll(poll)) => return Ok(poll.tpv.iter().find_map(|tpv| tpv.to_sample(&self.provider))),
                Ok(_) => {}
                Err(e) => warn!(%line, "⚠️ Skipping unreadable gpsd report: {}", e),
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl LocationProvider for GpsdProvider {
    #[instrument(skip(self, listener))]
    async fn request_updates(
        &self,
        provider_id: &str,
        min_time: Duration,
        min_distance_m: f64,
        listener: Sender<LocationEvent>,
    ) -> Result<Subscription, ProviderError> {
        self.ensure_provider(provider_id)?;

        info!("🛰️ Connecting to gpsd at {}...", self.address);
        let stream = watch(&self.address).await?;
        info!("🛰️ Connecting to gpsd at {}... OK", self.address);

        let (subscription, cancel) = Subscription::new(provider_id);
        let watcher = Watcher {
            gpsd: self.clone(),
            filter: UpdateFilter::new(min_time, min_distance_m),
            last_status: None,
            listener,
        };

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel => debug!("🛰️ Stopped watching gpsd"),
                _ = watcher.run(stream) => {}
            }
        });

        Ok(subscription)
    }

    #[instrument(skip(self))]
    async fn last_known_location(&self, provider_id: &str) -> Result<Option<PositionSample>, ProviderError> {
        self.ensure_provider(provider_id)?;

        timeout(self.poll_timeout, self.poll())
            .await
            .map_err(|_| ProviderError::Timeout(self.poll_timeout))?
    }
}

async fn watch(address: &str) -> std::io::Result<TcpStream> {
    let mut stream = TcpStream::connect(address).await?;
    stream.write_all(WATCH_COMMAND).await?;
    Ok(stream)
}

enum StreamEnd {
    Closed,
    ListenerGone,
}

/// Forwards reports from a gpsd connection to one listener, reconnecting whenever gpsd drops the connection.
struct Watcher {
    gpsd: GpsdProvider,
    filter: UpdateFilter,
    last_status: Option<ProviderStatus>,
    listener: Sender<LocationEvent>,
}

impl Watcher {
    async fn run(mut self, mut stream: TcpStream) {
        loop {
            match self.forward_reports(stream).await {
                Ok(StreamEnd::ListenerGone) => return,
                Ok(StreamEnd::Closed) => warn!("🔴 gpsd closed the connection"),
                Err(e) => warn!("⚠️ gpsd connection failed: {}", e),
            }

            self.last_status = Some(ProviderStatus::OutOfService);
            if self.status_changed(ProviderStatus::OutOfService).await.is_err() {
                return;
            }

            let strategy = ExponentialBackoff::from_millis(self.gpsd.retry_ms)
                .factor(2)
                .max_delay(self.gpsd.retry_max_delay)
                .map(jitter);

            info!("🛰️ Reconnecting to gpsd at {}...", self.gpsd.address);
            stream = match Retry::spawn(strategy, || watch(&self.gpsd.address)).await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("⚠️ Unable to reconnect to gpsd: {}", e);
                    return;
                }
            };
            info!("🛰️ Reconnecting to gpsd at {}... OK", self.gpsd.address);
        }
    }

    async fn forward_reports(&mut self, stream: TcpStream) -> Result<StreamEnd, ProviderError> {
        let mut lines = LinesStream::new(BufReader::new(stream).lines());

        while let Some(line) = lines.next().await {
            let line = line?;
            let report = match serde_json::from_str::<Report>(&line) {
                Ok(report) => report,
                Err(e) => {
                    warn!(%line, "⚠️ Skipping unreadable gpsd report: {}", e);
                    continue;
                }
            };

            if self.handle(report).await.is_err() {
                return Ok(StreamEnd::ListenerGone);
            }
        }

        Ok(StreamEnd::Closed)
    }

    async fn handle(&mut self, report: Report) -> Result<(), SendError<LocationEvent>> {
        match report {
            Report::Tpv(tpv) => {
                let status = tpv.status();
                if self.last_status != Some(status) {
                    self.last_status = Some(status);
                    self.status_changed(status).await?;
                }

                if let Some(sample) = tpv.to_sample(&self.gpsd.provider) {
                    if self.filter.accept(&sample, Instant::now()) {
                        self.listener.send(LocationEvent::LocationChanged(sample)).await?;
                    } else {
                        trace!("Dropped fix within the update thresholds");
                    }
                }
            }
            Report::Device(device) => self.device_changed(device).await?,
            Report::Devices { devices } => {
                for device in devices {
                    self.device_changed(device).await?;
                }
            }
            Report::Poll(_) | Report::Other => {}
        }

        Ok(())
    }

    async fn status_changed(&self, status: ProviderStatus) -> Result<(), SendError<LocationEvent>> {
        let provider = self.gpsd.provider.clone();
        self.listener.send(LocationEvent::StatusChanged { provider, status }).await
    }

    async fn device_changed(&self, device: Device) -> Result<(), SendError<LocationEvent>> {
        let provider = self.gpsd.provider.clone();
        debug!(path = ?device.path, active = device.is_active(), "🛰️ gpsd device changed");

        let event = if device.is_active() {
            LocationEvent::ProviderEnabled(provider)
        } else {
            LocationEvent::ProviderDisabled(provider)
        };
        self.listener.send(event).await
    }
}
