//! Client library for the OpenWeather current weather and forecast API.
//!
//! This crate defines:
//! - A shared request executor over one pre-configured HTTP client
//! - Weather and forecast accessors addressed by city name, id, coordinates or zip code
//! - Typed records mirroring the upstream JSON
//! - A facade composing both accessors behind capability traits
//! - On-disk configuration for the `openweather` CLI
//!
//! Upstream failures such as an unknown city come back as decoded records whose
//! `cod` is not a success code; check it.

pub mod client;
pub mod config;
pub mod coords;
pub mod error;
pub mod facade;
pub mod forecast;
pub mod model;
pub mod query;
pub mod weather;

#[cfg(test)]
mod test_support;

pub use client::{Client, DEFAULT_BASE_URL};
pub use config::Config;
pub use coords::Coordinates;
pub use error::{Error, Result};
pub use facade::{ForecastLookup, OpenWeather, WeatherLookup};
pub use forecast::Forecast;
pub use model::{DailyForecastData, ForecastData, WeatherData};
pub use query::{Location, Units};
pub use weather::Weather;
