mod client;
mod geocoder;
mod response;

pub use client::new_client;
pub use geocoder::NominatimGeocoder;
