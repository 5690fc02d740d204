use crate::models::reading::WeatherReading;
use chrono::{DateTime, Local};
use crossterm::style::Stylize;

const RULE: &str = "============================";
const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Formats reading for the terminal. `now` is the wall clock time shown next to it.
pub fn render(location: &str, reading: &WeatherReading, now: DateTime<Local>) -> String {
    let temperature = format!("{:.2}", reading.temperature).red();
    let humidity = format!("{:.2}", reading.humidity).blue();

    format!(
        "🌡️  Real-time {} Weather Monitor\n{}\n\nTemperature: {}°C\nHumidity: {}%\n\nLast Weather Update: {}\n\nCurrent Time: {}\n{}\n",
        location,
        RULE,
        temperature,
        humidity,
        reading.timestamp.format(CLOCK_FORMAT),
        now.format(CLOCK_FORMAT),
        RULE,
    )
}
