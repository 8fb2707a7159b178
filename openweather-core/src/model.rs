//! Records decoded from upstream responses.
//!
//! Shapes mirror the upstream JSON one-to-one. Every struct is decoded with
//! `#[serde(default)]`, so absent blocks (`rain`, `snow`, ...) come back as
//! zero values and unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coords::Coordinates;

fn epoch_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Upstream status code. `/weather` sends it as a number, `/forecast` as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cod {
    Number(i64),
    Text(String),
}

impl Default for Cod {
    fn default() -> Self {
        Cod::Number(0)
    }
}

impl Cod {
    pub fn code(&self) -> Option<u16> {
        match self {
            Cod::Number(n) => u16::try_from(*n).ok(),
            Cod::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code() == Some(200)
    }
}

impl std::fmt::Display for Cod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cod::Number(n) => write!(f, "{n}"),
            Cod::Text(s) => f.write_str(s),
        }
    }
}

/// The `message` field: a number on success, a human-readable reason on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Number(f64),
    Text(String),
}

impl Default for Message {
    fn default() -> Self {
        Message::Number(0.0)
    }
}

impl Message {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(s) => Some(s),
            Message::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Main {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u32,
    pub temp_min: f64,
    pub temp_max: f64,
    pub sea_level: f64,
    pub grnd_level: f64,
    /// Only present on forecast slots.
    pub temp_kf: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
    pub gust: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: u32,
}

/// Rain or snow volume in mm over the last hour / three hours.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub one_hour: f64,
    #[serde(rename = "3h")]
    pub three_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    pub message: f64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

impl Sys {
    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.sunrise)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.sunset)
    }
}

/// Current weather, as returned by `/weather`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherData {
    pub coord: Coordinates,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Main,
    pub visibility: u32,
    pub wind: Wind,
    pub clouds: Clouds,
    pub rain: Precipitation,
    pub snow: Precipitation,
    pub dt: i64,
    pub sys: Sys,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: Cod,
    pub message: Message,
}

impl WeatherData {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.dt)
    }
}

/// `d` or `n`: whether a forecast slot falls in daytime or at night.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartOfDay {
    pub pod: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: Main,
    pub weather: Vec<Condition>,
    pub clouds: Clouds,
    pub wind: Wind,
    pub visibility: u32,
    /// Probability of precipitation, 0..=1.
    pub pop: f64,
    pub sys: PartOfDay,
    pub dt_txt: String,
    pub rain: Precipitation,
    pub snow: Precipitation,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.dt)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastCity {
    pub id: i64,
    pub name: String,
    pub coord: Coordinates,
    pub country: String,
    pub population: u64,
    pub timezone: i64,
}

/// 5-day / 3-hour forecast, as returned by `/forecast`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastData {
    pub cod: Cod,
    pub message: Message,
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCity {
    pub geoname_id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    pub iso2: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyTemperature {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyEntry {
    pub dt: i64,
    pub temp: DailyTemperature,
    pub pressure: f64,
    pub humidity: u32,
    pub weather: Vec<Condition>,
    pub speed: f64,
    pub deg: f64,
    pub clouds: u32,
    pub rain: f64,
    pub snow: f64,
}

impl DailyEntry {
    pub fn date(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.dt)
    }
}

/// Daily forecast, as returned by `/forecast/daily`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecastData {
    pub cod: Cod,
    pub message: Message,
    pub city: DailyCity,
    pub cnt: u32,
    pub list: Vec<DailyEntry>,
}
