use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, Select, Text};
use openweather_core::{
    Config, Coordinates, DEFAULT_BASE_URL, Forecast, Location, Units, Weather,
    client::client_from_config, model::Cod,
};
use tracing::{info, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "openweather",
    version,
    about = "Current weather and forecasts from OpenWeather"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and defaults in the config file.
    Configure,

    /// Show current weather.
    Weather {
        #[command(flatten)]
        location: LocationArgs,

        /// standard, metric or imperial; defaults to the configured units.
        #[arg(long)]
        units: Option<Units>,

        /// Language code for condition descriptions, e.g. "de".
        #[arg(long)]
        lang: Option<String>,

        /// Print the raw record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the 5-day / 3-hour forecast.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long)]
        units: Option<Units>,

        #[arg(long)]
        json: bool,
    },

    /// Show the daily forecast.
    Daily {
        #[command(flatten)]
        location: LocationArgs,

        /// Passed through as `units`; empty means the configured units, else metric.
        #[arg(long, default_value = "")]
        units: String,

        /// Number of days; empty means 7 (16 for coordinates).
        #[arg(long, default_value = "")]
        count: String,

        #[arg(long)]
        json: bool,
    },
}

/// Exactly one selector: `--city`, `--id`, `--lat/--lon` or `--zip/--country`.
#[derive(Debug, Clone, Default, Args)]
pub struct LocationArgs {
    /// City name, optionally with country, e.g. "London,uk".
    #[arg(long)]
    pub city: Option<String>,

    /// Numeric city id.
    #[arg(long)]
    pub id: Option<i64>,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Postal code; use with --country.
    #[arg(long, requires = "country")]
    pub zip: Option<String>,

    /// Country code for --zip, e.g. "us".
    #[arg(long, requires = "zip")]
    pub country: Option<String>,
}

impl LocationArgs {
    pub fn to_location(&self) -> anyhow::Result<Location> {
        let mut found = Vec::new();

        if let Some(city) = &self.city {
            found.push(Location::city_name(city.as_str()));
        }
        if let Some(id) = self.id {
            found.push(Location::CityId(id));
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            found.push(Location::Coordinates(Coordinates::new(lat, lon)));
        }
        if let (Some(zip), Some(country)) = (&self.zip, &self.country) {
            found.push(Location::zip_code(zip.as_str(), country.as_str()));
        }

        match found.len() {
            1 => Ok(found.remove(0)),
            0 => Err(anyhow!(
                "No location given.\n\
                 Hint: pass one of --city, --id, --lat/--lon or --zip/--country."
            )),
            _ => Err(anyhow!(
                "Pass only one of --city, --id, --lat/--lon or --zip/--country."
            )),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }

        match self.command {
            Command::Configure => configure(config)?,
            Command::Weather { location, units, lang, json } => {
                let location = location.to_location()?;
                let units = units.or(config.units());

                let mut weather = Weather::new(Arc::new(client_from_config(&config)?));
                if let Some(units) = units {
                    weather = weather.with_units(units);
                }
                if let Some(lang) = lang {
                    weather = weather.with_lang(lang);
                }

                let data = weather.by_location(&location).await?;
                warn_on_failure(&data.cod, data.message.as_text());

                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    let units = units.unwrap_or(Units::Standard);
                    print!("{}", render::weather(&data, units));
                }
            }
            Command::Forecast { location, units, json } => {
                let location = location.to_location()?;
                let units = units.or(config.units());

                let mut forecast = Forecast::new(Arc::new(client_from_config(&config)?));
                if let Some(units) = units {
                    forecast = forecast.with_units(units);
                }

                let data = forecast.by_location(&location).await?;
                warn_on_failure(&data.cod, data.message.as_text());

                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    let units = units.unwrap_or(Units::Standard);
                    print!("{}", render::forecast(&data, units));
                }
            }
            Command::Daily { location, units, count, json } => {
                let location = location.to_location()?;
                if matches!(location, Location::ZipCode { .. }) {
                    bail!("The daily forecast cannot be looked up by zip code.");
                }

                let units = daily_units(units, &config);
                let forecast = Forecast::new(Arc::new(client_from_config(&config)?));
                let data = forecast.daily_by_location(&location, &units, &count).await?;
                warn_on_failure(&data.cod, data.message.as_text());

                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    // Unknown unit strings are sent as-is; label them like metric.
                    let label = units.parse().unwrap_or(Units::Metric);
                    print!("{}", render::daily(&data, label));
                }
            }
        }

        Ok(())
    }
}

/// Logs a warning for a non-success `cod`; the record is printed either way.
fn warn_on_failure(cod: &Cod, message: Option<&str>) -> bool {
    if cod.is_ok() {
        return false;
    }

    let message = message.unwrap_or("no message");
    warn!(%cod, message, "upstream reported failure");
    true
}

/// An empty `--units` falls back to the configured units, then to the library default.
fn daily_units(arg: String, config: &Config) -> String {
    if !arg.is_empty() {
        return arg;
    }

    config
        .units()
        .map(|units| units.to_string())
        .unwrap_or_default()
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("Base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    config.base_url = (base_url != DEFAULT_BASE_URL).then_some(base_url);

    let units = Select::new(
        "Default units:",
        vec![Units::Metric, Units::Imperial, Units::Standard],
    )
    .prompt()
    .context("Failed to read units")?;
    config.units = Some(units);

    config.save()?;
    let path = Config::config_file_path()?;
    info!(path = %path.display(), "configuration saved");

    Ok(())
}
