use crate::app_config::AppConfig;
use crate::extensions::locale_ext::default_language_tag;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;
use tracing::debug;

/// Builds the HTTP client used for Nominatim. Addresses come back in the configured language, or the default locale's.
pub fn new_client(config: &AppConfig) -> Result<Client, NominatimClientError> {
    let mut headers = header::HeaderMap::new();

    let language = config.geocoder().language().map(str::to_string).or_else(default_language_tag);
    if let Some(language) = language {
        debug!(%language, "Requesting addresses in '{}'", language);
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(&language)?);
    }

    let client = Client::builder()
        .user_agent(config.geocoder().user_agent())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum NominatimClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Nominatim client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}
