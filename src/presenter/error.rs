use crate::domain::geocoder::GeocodeError;
use thiserror::Error;

/// Failures that end the handling of a single event. They are logged, never shown to the user.
#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("location permission denied, location updates stay disabled for this session")]
    PermissionDenied,
    #[error("address lookup failed: {0}")]
    GeocodeUnavailable(#[from] GeocodeError),
}
