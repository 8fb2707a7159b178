//! Plain-text rendering of decoded records.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use openweather_core::{
    DailyForecastData, ForecastData, Units, WeatherData,
    model::Condition,
};

fn describe(conditions: &[Condition]) -> &str {
    conditions
        .first()
        .map(|c| c.description.as_str())
        .unwrap_or("Unknown")
}

fn time_or_dash(time: Option<DateTime<Utc>>, format: &str) -> String {
    time.map(|t| t.format(format).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn speed_suffix(units: Units) -> &'static str {
    match units {
        Units::Imperial => "mph",
        Units::Standard | Units::Metric => "m/s",
    }
}

pub fn weather(data: &WeatherData, units: Units) -> String {
    let t = units.temperature_suffix();
    let mut out = String::new();

    let place = if data.sys.country.is_empty() {
        data.name.clone()
    } else {
        format!("{}, {}", data.name, data.sys.country)
    };

    let _ = writeln!(out, "{place}");
    let _ = writeln!(out, "  {}", describe(&data.weather));
    let _ = writeln!(
        out,
        "  Temperature: {:.1}{t} (feels like {:.1}{t}, {:.1}..{:.1}{t})",
        data.main.temp, data.main.feels_like, data.main.temp_min, data.main.temp_max
    );
    let _ = writeln!(out, "  Humidity:    {}%", data.main.humidity);
    let _ = writeln!(out, "  Pressure:    {} hPa", data.main.pressure);
    let _ = writeln!(
        out,
        "  Wind:        {:.1} {} at {}°",
        data.wind.speed,
        speed_suffix(units),
        data.wind.deg
    );
    let _ = writeln!(out, "  Clouds:      {}%", data.clouds.all);
    if data.rain.one_hour > 0.0 || data.rain.three_hours > 0.0 {
        let _ = writeln!(
            out,
            "  Rain:        {} mm/1h, {} mm/3h",
            data.rain.one_hour, data.rain.three_hours
        );
    }
    if data.snow.one_hour > 0.0 || data.snow.three_hours > 0.0 {
        let _ = writeln!(
            out,
            "  Snow:        {} mm/1h, {} mm/3h",
            data.snow.one_hour, data.snow.three_hours
        );
    }
    let _ = writeln!(
        out,
        "  Sun:         {} - {} UTC",
        time_or_dash(data.sys.sunrise_at(), "%H:%M"),
        time_or_dash(data.sys.sunset_at(), "%H:%M")
    );
    let observed = time_or_dash(data.observed_at(), "%Y-%m-%d %H:%M UTC");
    let _ = writeln!(out, "  Observed:    {observed}");

    out
}

pub fn forecast(data: &ForecastData, units: Units) -> String {
    let t = units.temperature_suffix();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {} ({} slots)",
        data.city.name,
        data.city.country,
        data.list.len()
    );
    for entry in &data.list {
        let mut line = format!(
            "  {}  {:>6.1}{t}  {:>3}%  {}",
            time_or_dash(entry.time(), "%a %d %H:%M"),
            entry.main.temp,
            entry.main.humidity,
            describe(&entry.weather)
        );
        if entry.rain.three_hours > 0.0 {
            let _ = write!(line, ", rain {} mm", entry.rain.three_hours);
        }
        if entry.snow.three_hours > 0.0 {
            let _ = write!(line, ", snow {} mm", entry.snow.three_hours);
        }
        let _ = writeln!(out, "{line}");
    }

    out
}

pub fn daily(data: &DailyForecastData, units: Units) -> String {
    let t = units.temperature_suffix();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}, {} ({} days)",
        data.city.name,
        data.city.country,
        data.list.len()
    );
    for day in &data.list {
        let _ = writeln!(
            out,
            "  {}  {:>6.1}{t} / {:>6.1}{t}  {}",
            time_or_dash(day.date(), "%a %Y-%m-%d"),
            day.temp.min,
            day.temp.max,
            describe(&day.weather)
        );
    }

    out
}
