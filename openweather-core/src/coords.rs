use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, as found in the upstream `coord` block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat", default)]
    pub latitude: f64,
    #[serde(rename = "lon", default)]
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat`/`lon` query pairs; `f64`'s `Display` already prints the shortest
    /// representation that parses back to the same value.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("lat", self.latitude.to_string()),
            ("lon", self.longitude.to_string()),
        ]
    }
}
