use crate::domain::PositionSample;

/// Fix quality as reported by a provider, used for status changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderStatus {
    OutOfService,
    TemporarilyUnavailable,
    Available,
}

/// Everything a location provider delivers to a subscribed listener.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationEvent {
    LocationChanged(PositionSample),
    StatusChanged { provider: String, status: ProviderStatus },
    ProviderEnabled(String),
    ProviderDisabled(String),
}
