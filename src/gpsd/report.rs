use crate::domain::PositionSample;
use crate::domain::events::ProviderStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single line of gpsd's JSON protocol. Reports that are not needed to follow the position are ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(rename = "DEVICE")]
    Device(Device),
    #[serde(rename = "DEVICES")]
    Devices { devices: Vec<Device> },
    #[serde(rename = "POLL")]
    Poll(Poll),
    #[serde(other)]
    Other,
}

/// Time-position-velocity report.
#[derive(Debug, Deserialize)]
pub struct Tpv {
    #[serde(default)]
    pub mode: u8,
    pub time: Option<DateTime<Utc>>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
    #[serde(rename = "altHAE")]
    pub alt_hae: Option<f64>,
    pub eph: Option<f64>,
    pub epx: Option<f64>,
    pub epy: Option<f64>,
}

impl Tpv {
    /// Converts a report carrying at least a 2D fix into a sample published under `provider`.
    pub fn to_sample(&self, provider: &str) -> Option<PositionSample> {
        if self.mode < 2 {
            return None;
        }

        let (latitude, longitude) = (self.lat?, self.lon?);
        let accuracy = self.eph.or_else(|| match (self.epx, self.epy) {
            (Some(epx), Some(epy)) => Some(epx.max(epy)),
            (epx, epy) => epx.or(epy),
        });

        Some(
            PositionSample::new(provider, latitude, longitude)
                .with_altitude(self.alt_hae.or(self.alt))
                .with_accuracy(accuracy)
                .with_time(self.time),
        )
    }

    pub fn status(&self) -> ProviderStatus {
        match self.mode {
            2 | 3 => ProviderStatus::Available,
            _ => ProviderStatus::TemporarilyUnavailable,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Device {
    pub path: Option<String>,
    pub activated: Option<String>,
}

impl Device {
    /// gpsd reports a closed device with a missing or zero activation time.
    pub fn is_active(&self) -> bool {
        self.activated.as_deref().is_some_and(|activated| !activated.is_empty() && activated != "0")
    }
}

#[derive(Debug, Deserialize)]
pub struct Poll {
    #[serde(default)]
    pub tpv: Vec<Tpv>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const TPV_3D: &str = r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2024-05-01T10:00:01.000Z","ept":0.005,"lat":46.5543672,"lon":7.9785387,"altHAE":1034.2,"alt":1031.9,"epx":4.1,"epy":5.3,"eph":6.2}"#;

    #[test]
    fn deserialize_a_3d_fix() -> Result<(), serde_json::Error> {
        let Report::Tpv(tpv) = serde_json::from_str::<Report>(TPV_3D)? else {
            panic!("Expected a TPV report");
        };

        let sample = tpv.to_sample("gps").expect("a 3D fix has a position");

        assert_eq!(sample.provider(), "gps");
        assert_eq!(sample.latitude(), 46.5543672);
        assert_eq!(sample.longitude(), 7.9785387);
        assert_eq!(sample.altitude(), Some(1034.2));
        assert_eq!(sample.accuracy(), Some(6.2));
        assert_eq!(sample.time().map(|t| t.to_rfc3339()), Some("2024-05-01T10:00:01+00:00".to_string()));
        assert_eq!(tpv.status(), ProviderStatus::Available);
        Ok(())
    }

    #[test]
    fn accuracy_falls_back_to_the_largest_axis_error() -> Result<(), serde_json::Error> {
        let json = r#"{"class":"TPV","mode":2,"lat":1.0,"lon":2.0,"epx":4.1,"epy":5.3}"#;
        let Report::Tpv(tpv) = serde_json::from_str::<Report>(json)? else {
            panic!("Expected a TPV report");
        };

        let sample = tpv.to_sample("gps").expect("a 2D fix has a position");

        assert_eq!(sample.accuracy(), Some(5.3));
        assert_eq!(sample.altitude(), None);
        Ok(())
    }

    #[rstest]
    #[case(r#"{"class":"TPV","mode":1}"#)]
    #[case(r#"{"class":"TPV","mode":0,"lat":1.0,"lon":2.0}"#)]
    #[case(r#"{"class":"TPV","mode":2,"lat":1.0}"#)]
    fn reports_without_a_fix_have_no_sample(#[case] json: &str) -> Result<(), serde_json::Error> {
        let Report::Tpv(tpv) = serde_json::from_str::<Report>(json)? else {
            panic!("Expected a TPV report");
        };

        assert_eq!(tpv.to_sample("gps"), None);
        Ok(())
    }

    #[rstest]
    #[case(r#"{"class":"VERSION","release":"3.25","proto_major":3,"proto_minor":15}"#)]
    #[case(r#"{"class":"WATCH","enable":true,"json":true}"#)]
    #[case(r#"{"class":"SKY","satellites":[]}"#)]
    fn ignores_unrelated_reports(#[case] json: &str) -> Result<(), serde_json::Error> {
        assert!(matches!(serde_json::from_str::<Report>(json)?, Report::Other));
        Ok(())
    }

    #[rstest]
    #[case(0, ProviderStatus::TemporarilyUnavailable)]
    #[case(1, ProviderStatus::TemporarilyUnavailable)]
    #[case(2, ProviderStatus::Available)]
    #[case(3, ProviderStatus::Available)]
    fn status_follows_fix_availability(#[case] mode: u8, #[case] expected: ProviderStatus) -> Result<(), serde_json::Error> {
        let Report::Tpv(tpv) = serde_json::from_str::<Report>(&format!(r#"{{"class":"TPV","mode":{}}}"#, mode))? else {
            panic!("Expected a TPV report");
        };

        assert_eq!(tpv.status(), expected);
        Ok(())
    }

    #[rstest]
    #[case(r#"{"class":"DEVICE","path":"/dev/ttyACM0","activated":"2024-05-01T10:00:00.000Z"}"#, true)]
    #[case(r#"{"class":"DEVICE","path":"/dev/ttyACM0","activated":"0"}"#, false)]
    #[case(r#"{"class":"DEVICE","path":"/dev/ttyACM0"}"#, false)]
    fn device_activation(#[case] json: &str, #[case] expected: bool) -> Result<(), serde_json::Error> {
        let Report::Device(device) = serde_json::from_str::<Report>(json)? else {
            panic!("Expected a DEVICE report");
        };

        assert_eq!(device.is_active(), expected);
        Ok(())
    }

    #[test]
    fn deserialize_a_poll_response() -> Result<(), serde_json::Error> {
        let json = format!(r#"{{"class":"POLL","time":"2024-05-01T10:00:02.000Z","active":1,"tpv":[{}],"sky":[]}}"#, TPV_3D);

        let Report::Poll(poll) = serde_json::from_str::<Report>(&json)? else {
            panic!("Expected a POLL report");
        };

        assert_eq!(poll.tpv.len(), 1);
        assert_eq!(poll.tpv[0].lat, Some(46.5543672));
        Ok(())
    }
}
