use crate::error::types::Result;
use crate::models::reading::WeatherReading;
use crate::render::render;
use crate::shutdown::Shutdown;
use chrono::Local;
use futures::{Stream, StreamExt};
use std::convert::TryFrom;
use std::io::Write;

/// Renders every decodable payload from `messages` into `out` until shutdown or end of stream.
///
/// Payloads that are not valid readings are logged and skipped. Returns number of rendered
/// readings, an error only when writing to `out` fails.
pub async fn monitor<S, W>(
    location: &str,
    mut messages: S,
    shutdown: &mut Shutdown,
    out: &mut W,
) -> Result<u64>
where
    S: Stream<Item = Vec<u8>> + Unpin,
    W: Write,
{
    let mut rendered = 0;

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                debug!("monitor: closing");
                return Ok(rendered);
            }
            msg = messages.next() => {
                let payload = match msg {
                    Some(payload) => payload,
                    None => {
                        info!("message stream ended");
                        return Ok(rendered);
                    }
                };

                match WeatherReading::try_from(payload.as_slice()) {
                    Err(e) => warn!("Failed to unmarshal weather data: {}", e),
                    Ok(reading) => {
                        write!(out, "{}", render(location, &reading, Local::now()))?;
                        out.flush()?;
                        rendered += 1;
                    }
                }
            }
        }
    }
}
