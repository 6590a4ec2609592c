use crate::domain::ResolvedAddress;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

#[async_trait]
pub trait ReverseGeocoder: Debug + Send + Sync {
    /// Looks up at most `max_results` addresses near the coordinate. No match is an empty list, not an error.
    async fn resolve(&self, latitude: f64, longitude: f64, max_results: usize) -> Result<Vec<ResolvedAddress>, GeocodeError>;
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding service unreachable: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geocoding service returned an invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
