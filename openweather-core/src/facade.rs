//! Capability traits and the handle that composes them.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    client::{Client, client_from_config},
    config::Config,
    coords::Coordinates,
    error::Result,
    forecast::Forecast,
    model::{ForecastData, WeatherData},
    weather::Weather,
};

#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn get_by_city_name(&self, city_name: &str) -> Result<WeatherData>;
    async fn get_by_city_id(&self, city_id: i64) -> Result<WeatherData>;
    async fn get_by_coordinates(&self, coords: Coordinates) -> Result<WeatherData>;
    async fn get_by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<WeatherData>;
}

#[async_trait]
pub trait ForecastLookup: Send + Sync + Debug {
    async fn get_by_city_name(&self, city_name: &str) -> Result<ForecastData>;
    async fn get_by_city_id(&self, city_id: i64) -> Result<ForecastData>;
    async fn get_by_coordinates(&self, coords: Coordinates) -> Result<ForecastData>;
    async fn get_by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<ForecastData>;
}

#[async_trait]
impl WeatherLookup for Weather {
    async fn get_by_city_name(&self, city_name: &str) -> Result<WeatherData> {
        self.by_city_name(city_name).await
    }

    async fn get_by_city_id(&self, city_id: i64) -> Result<WeatherData> {
        self.by_city_id(city_id).await
    }

    async fn get_by_coordinates(&self, coords: Coordinates) -> Result<WeatherData> {
        self.by_coordinates(coords).await
    }

    async fn get_by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<WeatherData> {
        self.by_zip_code(zip_code, country_code).await
    }
}

#[async_trait]
impl ForecastLookup for Forecast {
    async fn get_by_city_name(&self, city_name: &str) -> Result<ForecastData> {
        self.by_city_name(city_name).await
    }

    async fn get_by_city_id(&self, city_id: i64) -> Result<ForecastData> {
        self.by_city_id(city_id).await
    }

    async fn get_by_coordinates(&self, coords: Coordinates) -> Result<ForecastData> {
        self.by_coordinates(coords).await
    }

    async fn get_by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<ForecastData> {
        self.by_zip_code(zip_code, country_code).await
    }
}

/// One handle over a weather lookup and a forecast lookup.
#[derive(Debug)]
pub struct OpenWeather {
    weather: Box<dyn WeatherLookup>,
    forecast: Box<dyn ForecastLookup>,
}

impl OpenWeather {
    /// Wire both accessors to one shared client.
    pub fn new(client: Client) -> Self {
        let client = Arc::new(client);
        Self {
            weather: Box::new(Weather::new(Arc::clone(&client))),
            forecast: Box::new(Forecast::new(client)),
        }
    }

    pub fn from_parts(weather: Box<dyn WeatherLookup>, forecast: Box<dyn ForecastLookup>) -> Self {
        Self { weather, forecast }
    }

    pub fn weather(&self) -> &dyn WeatherLookup {
        self.weather.as_ref()
    }

    pub fn forecast(&self) -> &dyn ForecastLookup {
        self.forecast.as_ref()
    }
}

/// Construct the facade from the stored configuration.
pub fn openweather_from_config(config: &Config) -> anyhow::Result<OpenWeather> {
    let client = client_from_config(config)?;
    let units = config.units();

    let client = Arc::new(client);
    let mut weather = Weather::new(Arc::clone(&client));
    let mut forecast = Forecast::new(client);
    if let Some(units) = units {
        weather = weather.with_units(units);
        forecast = forecast.with_units(units);
    }

    Ok(OpenWeather::from_parts(Box::new(weather), Box::new(forecast)))
}
