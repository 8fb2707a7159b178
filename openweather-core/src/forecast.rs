//! Forecast accessor: 5-day/3-hour (`/forecast`) and daily (`/forecast/daily`).

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use crate::{
    client::Client,
    coords::Coordinates,
    error::Result,
    model::{DailyForecastData, ForecastData},
    query::{Location, RequestOptions, Units},
};

pub const FORECAST_PATH: &str = "forecast";
pub const DAILY_FORECAST_PATH: &str = "forecast/daily";

pub const DEFAULT_DAILY_UNITS: &str = "metric";
pub const DEFAULT_DAILY_COUNT: &str = "7";
pub const DEFAULT_DAILY_COUNT_BY_COORDINATES: &str = "16";

#[derive(Debug, Clone)]
pub struct Forecast {
    client: Arc<Client>,
    options: RequestOptions,
}

impl Forecast {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    /// Units for the 5-day forecast; daily lookups take theirs per call.
    pub fn with_units(mut self, units: Units) -> Self {
        self.options.units = Some(units);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.options.lang = Some(lang.into());
        self
    }

    pub fn url_for(&self, location: &Location) -> Result<Url> {
        let mut params = location.query_pairs();
        self.options.append_to(&mut params);
        self.client.endpoint_url(FORECAST_PATH, &params)
    }

    /// Empty `units` or `count` fall back to the defaults; anything else is sent verbatim.
    pub fn daily_url_for(&self, location: &Location, units: &str, count: &str) -> Result<Url> {
        let default_count = match location {
            Location::Coordinates(_) => DEFAULT_DAILY_COUNT_BY_COORDINATES,
            _ => DEFAULT_DAILY_COUNT,
        };

        let mut params = location.query_pairs();
        params.push(("units", or_default(units, DEFAULT_DAILY_UNITS).to_string()));
        params.push(("cnt", or_default(count, default_count).to_string()));
        if let Some(lang) = &self.options.lang {
            params.push(("lang", lang.clone()));
        }

        self.client.endpoint_url(DAILY_FORECAST_PATH, &params)
    }

    #[instrument(skip_all, fields(%location))]
    pub async fn by_location(&self, location: &Location) -> Result<ForecastData> {
        let url = self.url_for(location)?;
        self.client.execute(reqwest::Method::GET, url).await
    }

    pub async fn by_city_name(&self, city_name: &str) -> Result<ForecastData> {
        self.by_location(&Location::city_name(city_name)).await
    }

    pub async fn by_city_id(&self, city_id: i64) -> Result<ForecastData> {
        self.by_location(&Location::CityId(city_id)).await
    }

    pub async fn by_coordinates(&self, coords: Coordinates) -> Result<ForecastData> {
        self.by_location(&Location::Coordinates(coords)).await
    }

    pub async fn by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<ForecastData> {
        let location = Location::zip_code(zip_code, country_code);
        self.by_location(&location).await
    }

    #[instrument(skip_all, fields(%location, units = %units, count = %count))]
    pub async fn daily_by_location(
        &self,
        location: &Location,
        units: &str,
        count: &str,
    ) -> Result<DailyForecastData> {
        let url = self.daily_url_for(location, units, count)?;
        self.client.execute(reqwest::Method::GET, url).await
    }

    pub async fn daily_by_city_name(
        &self,
        city_name: &str,
        units: &str,
        count: &str,
    ) -> Result<DailyForecastData> {
        let location = Location::city_name(city_name);
        self.daily_by_location(&location, units, count).await
    }

    pub async fn daily_by_city_id(
        &self,
        city_id: i64,
        units: &str,
        count: &str,
    ) -> Result<DailyForecastData> {
        let location = Location::CityId(city_id);
        self.daily_by_location(&location, units, count).await
    }

    pub async fn daily_by_coordinates(
        &self,
        coords: Coordinates,
        units: &str,
        count: &str,
    ) -> Result<DailyForecastData> {
        let location = Location::Coordinates(coords);
        self.daily_by_location(&location, units, count).await
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
