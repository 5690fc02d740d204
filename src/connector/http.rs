use crate::config::ForecastConfig;
use crate::error::types::{Error, Result};
use crate::models::reading::WeatherReading;
use crate::producer::ReadingSource;
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;

/// Layout of `current.time` in forecast responses.
pub const FORECAST_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
}

/// Turns forecast response body into a reading. Time is given without zone and taken as UTC.
pub fn parse_forecast(body: &str) -> Result<WeatherReading> {
    let response: ForecastResponse = serde_json::from_str(body).map_err(|e| {
        Error::new_parse(
            "forecast",
            "error unmarshalling JSON",
            e.to_string().as_str(),
        )
    })?;

    let naive = NaiveDateTime::parse_from_str(&response.current.time, FORECAST_TIME_FORMAT)
        .map_err(|e| Error::new_parse("forecast", "error parsing time", e.to_string().as_str()))?;

    Ok(WeatherReading::new(
        response.current.temperature_2m,
        response.current.relative_humidity_2m,
        Utc.from_utc_datetime(&naive),
    ))
}

/// Open-Meteo client asking for current conditions at one fixed location.
pub struct ForecastClient {
    client: Client,
    cfg: ForecastConfig,
}

impl ForecastClient {
    pub fn new(cfg: ForecastConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| {
                Error::new_fetch(
                    cfg.endpoint.as_str(),
                    "failed to build http client",
                    e.to_string().as_str(),
                )
            })?;
        Ok(Self { client, cfg })
    }

    fn query(&self) -> [(&'static str, String); 3] {
        [
            ("latitude", self.cfg.latitude.to_string()),
            ("longitude", self.cfg.longitude.to_string()),
            ("current", String::from(CURRENT_FIELDS)),
        ]
    }

    async fn get(&self) -> Result<String> {
        let fetch_err = |msg: &str, e: reqwest::Error| {
            Error::new_fetch(self.cfg.endpoint.as_str(), msg, e.to_string().as_str())
        };

        let response = self
            .client
            .get(&self.cfg.endpoint)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| fetch_err("error making request", e))?
            .error_for_status()
            .map_err(|e| fetch_err("unexpected status", e))?;

        response
            .text()
            .await
            .map_err(|e| fetch_err("error reading response body", e))
    }
}

#[async_trait]
impl ReadingSource for ForecastClient {
    async fn fetch(&self) -> Result<WeatherReading> {
        let body = self.get().await?;
        debug!("forecast response: {}", body);
        parse_forecast(&body)
    }
}
