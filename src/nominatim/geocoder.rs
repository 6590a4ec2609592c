use crate::domain::ResolvedAddress;
use crate::domain::geocoder::{GeocodeError, ReverseGeocoder};
use crate::nominatim::response::ReverseResponse;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Reverse geocoding against a Nominatim instance.
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        NominatimGeocoder {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, latitude: f64, longitude: f64, max_results: usize) -> Result<Vec<ResolvedAddress>, GeocodeError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        debug!("🌍 Resolving address...");
        let body = self
            .client
            .get(format!("{}/reverse", self.url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // Reverse lookups return a single place at most
        match serde_json::from_str::<ReverseResponse>(&body)? {
            ReverseResponse::NotFound { error } => {
                debug!("🌍 Resolving address... none found: {}", error);
                Ok(Vec::new())
            }
            ReverseResponse::Place(place) => {
                debug!(place = ?place.display_name, "🌍 Resolving address... OK");
                Ok(vec![place.address.into()])
            }
        }
    }
}
