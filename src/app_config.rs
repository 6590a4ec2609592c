use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    gpsd: Gpsd,
    geocoder: Geocoder,
    permission: Permission,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("HIKERS_WATCH").prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn gpsd(&self) -> &Gpsd {
        &self.gpsd
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    pub fn permission(&self) -> &Permission {
        &self.permission
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Gpsd {
    host: String,
    port: u16,
    provider: String,
    #[serde(with = "humantime_serde")]
    poll_timeout: Duration,
    retry_ms: u64,
    #[serde(with = "humantime_serde")]
    retry_max_delay: Duration,
}

impl Gpsd {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Name under which fixes from gpsd are published.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn poll_timeout(&self) -> Duration {
        self.poll_timeout
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay(&self) -> Duration {
        self.retry_max_delay
    }
}

#[derive(Debug, Deserialize)]
pub struct Geocoder {
    url: String,
    user_agent: String,
    language: Option<String>,
}

impl Geocoder {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct Permission {
    runtime_model: bool,
    preapproved: bool,
}

impl Permission {
    pub fn runtime_model(&self) -> bool {
        self.runtime_model
    }

    pub fn preapproved(&self) -> bool {
        self.preapproved
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { event_buffer_size: 8 },
                gpsd: Gpsd {
                    host: "127.0.0.1".to_string(),
                    port: 2947,
                    provider: "gps".to_string(),
                    poll_timeout: Duration::from_millis(500),
                    retry_ms: 10,
                    retry_max_delay: Duration::from_millis(50),
                },
                geocoder: Geocoder {
                    url: "https://nominatim.url".to_string(),
                    user_agent: "hikers_watch-test".to_string(),
                    language: Some("en-US".to_string()),
                },
                permission: Permission {
                    runtime_model: true,
                    preapproved: false,
                },
            },
        }
    }

    pub fn gpsd_port(mut self, port: u16) -> Self {
        self.config.gpsd.port = port;
        self
    }

    pub fn geocoder_url(mut self, url: String) -> Self {
        self.config.geocoder.url = url;
        self
    }

    pub fn geocoder_language(mut self, language: Option<&str>) -> Self {
        self.config.geocoder.language = language.map(str::to_string);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
