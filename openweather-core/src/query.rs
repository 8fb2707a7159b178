//! Selectors and optional parameters that end up in the query string.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::coords::Coordinates;

/// One way of addressing a location upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    CityName(String),
    CityId(i64),
    Coordinates(Coordinates),
    ZipCode { zip: String, country: String },
}

impl Location {
    pub fn city_name(name: impl Into<String>) -> Self {
        Location::CityName(name.into())
    }

    pub fn zip_code(zip: impl Into<String>, country: impl Into<String>) -> Self {
        Location::ZipCode {
            zip: zip.into(),
            country: country.into(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::CityName(name) => vec![("q", name.clone())],
            Location::CityId(id) => vec![("id", id.to_string())],
            Location::Coordinates(coords) => coords.query_pairs().to_vec(),
            Location::ZipCode { zip, country } => vec![("zip", format!("{zip},{country}"))],
        }
    }
}

impl From<Coordinates> for Location {
    fn from(coords: Coordinates) -> Self {
        Location::Coordinates(coords)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::CityName(name) => f.write_str(name),
            Location::CityId(id) => write!(f, "city #{id}"),
            Location::Coordinates(c) => write!(f, "{}, {}", c.latitude, c.longitude),
            Location::ZipCode { zip, country } => write!(f, "{zip}, {country}"),
        }
    }
}

/// Unit system requested with `units=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: standard, metric, imperial."
            )),
        }
    }
}

/// Optional `units`/`lang` parameters shared by the weather and 5-day forecast accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub units: Option<Units>,
    pub lang: Option<String>,
}

impl RequestOptions {
    pub(crate) fn append_to(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(units) = self.units {
            params.push(("units", units.as_str().to_string()));
        }
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.clone()));
        }
    }
}
