use std::time::Duration;

pub const DEFAULT_BROKERS: &str = "localhost:9092";
pub const DEFAULT_TOPIC: &str = "weather-data";
pub const FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone, PartialEq)]
/// Configuration for kafka clients.
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
    pub send_retries: u32,
    pub retry_backoff: Duration,
    /// Upper bound for a single delivery, retries included.
    pub message_timeout: Duration,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: String::from(DEFAULT_BROKERS),
            topic: String::from(DEFAULT_TOPIC),
            group_id: String::from("weather-monitor"),
            send_retries: 5,
            retry_backoff: Duration::from_secs(1),
            message_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Where and what to ask the forecast API for.
pub struct ForecastConfig {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: String, // human readable name, only used for display.
    pub request_timeout: Duration,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(FORECAST_ENDPOINT),
            latitude: 43.6532,
            longitude: -79.3832,
            location: String::from("Toronto"),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub kafka: KafkaConfig,
    pub forecast: ForecastConfig,
    /// Delay before the producer touches the broker, gives kafka time to come up.
    pub startup_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kafka: KafkaConfig::default(),
            forecast: ForecastConfig::default(),
            startup_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.kafka.topic, "weather-data");
        assert_eq!(cfg.kafka.brokers, "localhost:9092");
        assert_eq!(cfg.kafka.send_retries, 5);
        assert_eq!(cfg.kafka.retry_backoff, Duration::from_secs(1));
        assert_eq!(cfg.forecast.endpoint, FORECAST_ENDPOINT);
        assert_eq!(cfg.startup_delay, Duration::from_secs(5));
        assert_eq!(cfg.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_message_timeout_covers_all_retries() {
        let cfg = KafkaConfig::default();
        assert!(cfg.message_timeout > cfg.retry_backoff * (cfg.send_retries + 1));
    }
}
