use crate::error::types::Result;
use crate::models::reading::WeatherReading;
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
/// Anything that can produce a fresh reading on demand.
pub trait ReadingSource {
    async fn fetch(&self) -> Result<WeatherReading>;
}

#[cfg_attr(test, automock)]
#[async_trait]
/// Destination for readings. An error returned from `publish` is final, retries are
/// the implementation's business.
pub trait ReadingSink {
    async fn publish(&self, reading: &WeatherReading) -> Result<()>;
}

/// Moves readings from `source` to `sink` until shutdown is signalled.
///
/// Failed fetches are logged and retried on the next tick, a failed publish ends the loop
/// with the error. Returns number of published readings.
pub async fn run<S, P>(
    source: &S,
    sink: &P,
    poll_interval: Duration,
    shutdown: &mut Shutdown,
) -> Result<u64>
where
    S: ReadingSource + Sync,
    P: ReadingSink + Sync,
{
    let mut published = 0;

    while !shutdown.is_shutdown() {
        match source.fetch().await {
            Err(e) => warn!("Failed to fetch weather data: {}", e),
            Ok(reading) => {
                sink.publish(&reading).await?;
                published += 1;
                info!("reading {} sent to kafka: {:?}", published, reading);
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                debug!("producer: closing");
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }

    Ok(published)
}
