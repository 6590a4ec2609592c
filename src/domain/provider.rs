use crate::domain::PositionSample;
use crate::domain::events::LocationEvent;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;

/// Fires once the matching [`Subscription`] is dropped or cancelled.
pub type CancelSignal = oneshot::Receiver<()>;

#[async_trait]
pub trait LocationProvider: Debug + Send + Sync {
    /// Starts delivering events of `provider_id` to `listener` until the returned subscription is dropped.
    /// A `min_time` and `min_distance_m` of zero deliver every fix.
    async fn request_updates(
        &self,
        provider_id: &str,
        min_time: Duration,
        min_distance_m: f64,
        listener: Sender<LocationEvent>,
    ) -> Result<Subscription, ProviderError>;

    async fn last_known_location(&self, provider_id: &str) -> Result<Option<PositionSample>, ProviderError>;
}

/// Handle to an active stream of location events. Dropping it stops the stream.
#[derive(Debug)]
pub struct Subscription {
    provider: String,
    _cancel: oneshot::Sender<()>,
}

impl Subscription {
    pub fn new(provider: impl Into<String>) -> (Self, CancelSignal) {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let subscription = Subscription {
            provider: provider.into(),
            _cancel: cancel_tx,
        };

        (subscription, cancel_rx)
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Stops the stream now rather than when the handle goes out of scope.
    pub fn cancel(self) {}
}

/// Drops fixes that arrive sooner than `min_time` or closer than `min_distance_m` after the last delivered fix.
#[derive(Debug)]
pub struct UpdateFilter {
    min_time: Duration,
    min_distance_m: f64,
    last: Option<(Instant, PositionSample)>,
}

impl UpdateFilter {
    pub fn new(min_time: Duration, min_distance_m: f64) -> Self {
        UpdateFilter {
            min_time,
            min_distance_m,
            last: None,
        }
    }

    pub fn accept(&mut self, sample: &PositionSample, now: Instant) -> bool {
        let accepted = match &self.last {
            None => true,
            Some((at, last)) => {
                now.saturating_duration_since(*at) >= self.min_time && last.distance_to(sample) >= self.min_distance_m
            }
        };

        if accepted {
            self.last = Some((now, sample.clone()));
        }
        accepted
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("unknown location provider '{0}'")]
    UnknownProvider(String),
    #[error("location provider connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("location provider sent an invalid report: {0}")]
    InvalidReport(#[from] serde_json::Error),
    #[error("location provider did not answer within {0:?}")]
    Timeout(Duration),
}
