use chrono::{DateTime, Utc};

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A single fix reported by a location provider. Samples are never mutated, every update is a new value.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionSample {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>, // In meters
    accuracy: Option<f64>, // In meters
    time: Option<DateTime<Utc>>,
    provider: String,
}

impl PositionSample {
    pub fn new(provider: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        PositionSample {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            time: None,
            provider: provider.into(),
        }
    }

    pub fn with_altitude(mut self, altitude: Option<f64>) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_accuracy(mut self, accuracy: Option<f64>) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.time = time;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &PositionSample) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_itself_is_zero() {
        let sample = PositionSample::new("gps", 51.8615899, 4.3580323);

        assert_eq!(sample.distance_to(&sample), 0.0);
    }

    #[test]
    fn distance_of_one_degree_latitude() {
        let a = PositionSample::new("gps", 0.0, 0.0);
        let b = PositionSample::new("gps", 1.0, 0.0);

        let distance = a.distance_to(&b);

        assert!((distance - 111_195.0).abs() < 1.0, "unexpected distance {}", distance);
    }

    #[test]
    fn builder_methods_do_not_touch_the_coordinates() {
        let sample = PositionSample::new("gps", 1.5, -2.5).with_altitude(Some(12.0)).with_accuracy(Some(3.0));

        assert_eq!(sample.latitude(), 1.5);
        assert_eq!(sample.longitude(), -2.5);
        assert_eq!(sample.altitude(), Some(12.0));
        assert_eq!(sample.accuracy(), Some(3.0));
        assert_eq!(sample.time(), None);
        assert_eq!(sample.provider(), "gps");
    }
}
