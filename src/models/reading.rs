use crate::error::types::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Single temperature/humidity observation, the only thing that travels over the topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64, // degrees Celsius.
    pub humidity: f64,    // relative humidity, percent.
    pub timestamp: DateTime<Utc>,
}

impl WeatherReading {
    pub fn new(temperature: f64, humidity: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            temperature,
            humidity,
            timestamp,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            Error::new_parse(
                "WeatherReading::to_json",
                "failed to serialize",
                e.to_string().as_str(),
            )
        })
    }
}

impl TryFrom<&[u8]> for WeatherReading {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        serde_json::from_slice(value).map_err(|e| {
            Error::new_parse(
                "WeatherReading::try_from",
                "failed to deserialize",
                e.to_string().as_str(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading() -> WeatherReading {
        WeatherReading::new(-3.25, 64.5, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_json_round_trip() {
        let r = reading();
        let json = r.to_json().unwrap();
        let back = WeatherReading::try_from(json.as_bytes()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_wire_format() {
        let value: serde_json::Value = serde_json::from_str(&reading().to_json().unwrap()).unwrap();
        assert_eq!(value["temperature"], -3.25);
        assert_eq!(value["humidity"], 64.5);
        assert_eq!(value["timestamp"], "2024-01-01T12:00:00Z");
    }

    #[test]
    fn test_accepts_offset_timestamps() {
        let payload = br#"{"temperature":1.0,"humidity":2.0,"timestamp":"2024-01-01T14:00:00+02:00"}"#;
        let r = WeatherReading::try_from(&payload[..]).unwrap();
        assert_eq!(r.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_malformed_payload() {
        let res = WeatherReading::try_from(&b"{not json"[..]);
        assert!(matches!(res, Err(Error::Parse { .. })));

        let res = WeatherReading::try_from(&br#"{"temperature":1.0}"#[..]);
        assert!(matches!(res, Err(Error::Parse { .. })));
    }
}
