//! Current weather accessor (`/weather`).

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use crate::{
    client::Client,
    coords::Coordinates,
    error::Result,
    model::WeatherData,
    query::{Location, RequestOptions, Units},
};

pub const WEATHER_PATH: &str = "weather";

#[derive(Debug, Clone)]
pub struct Weather {
    client: Arc<Client>,
    options: RequestOptions,
}

impl Weather {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

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
        self.client.endpoint_url(WEATHER_PATH, &params)
    }

    #[instrument(skip_all, fields(%location))]
    pub async fn by_location(&self, location: &Location) -> Result<WeatherData> {
        let url = self.url_for(location)?;
        self.client.execute(reqwest::Method::GET, url).await
    }

    pub async fn by_city_name(&self, city_name: &str) -> Result<WeatherData> {
        self.by_location(&Location::city_name(city_name)).await
    }

    pub async fn by_city_id(&self, city_id: i64) -> Result<WeatherData> {
        self.by_location(&Location::CityId(city_id)).await
    }

    pub async fn by_coordinates(&self, coords: Coordinates) -> Result<WeatherData> {
        self.by_location(&Location::Coordinates(coords)).await
    }

    pub async fn by_zip_code(&self, zip_code: &str, country_code: &str) -> Result<WeatherData> {
        let location = Location::zip_code(zip_code, country_code);
        self.by_location(&location).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, API_KEY, expected, query_of};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    const LONDON: &str = r#"{"cod":"200","main":{"temp":289.5},"name":"London"}"#;
    const WRONG_TYPE: &str = r#"{"name": 42}"#;

    fn weather() -> Weather {
        Weather::new(Arc::new(Client::new(API_KEY).unwrap()))
    }

    async fn all_operations(w: &Weather) -> Vec<Result<WeatherData>> {
        vec![
            w.by_city_name("London").await,
            w.by_city_id(2643743).await,
            w.by_coordinates(Coordinates::new(51.51, -0.13)).await,
            w.by_zip_code("94040", "us").await,
        ]
    }

    #[test]
    fn query_per_selector_is_exact() {
        let w = weather();
        let cebu = Location::from(Coordinates::new(10.3157, 123.885));

        let cases = [
            (Location::city_name("London"), vec![("q", "London")]),
            (Location::CityId(2643743), vec![("id", "2643743")]),
            (cebu, vec![("lat", "10.3157"), ("lon", "123.885")]),
            (Location::zip_code("6000", "PH"), vec![("zip", "6000,PH")]),
        ];

        for (location, mut params) in cases {
            let url = w.url_for(&location).unwrap();
            params.push(("appid", API_KEY));

            assert!(url.path().ends_with("/weather"), "{url}");
            assert_eq!(query_of(&url), expected(&params), "{location:?}");
        }
    }

    #[test]
    fn units_and_lang_precede_api_key() {
        let w = weather().with_units(Units::Imperial).with_lang("fr");
        let url = w.url_for(&Location::city_name("Paris")).unwrap();

        let want = [
            ("q", "Paris"),
            ("units", "imperial"),
            ("lang", "fr"),
            ("appid", API_KEY),
        ];
        assert_eq!(query_of(&url), expected(&want));
    }

    #[tokio::test]
    async fn by_city_name_decodes_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
            .expect(1)
            .mount(&server)
            .await;

        let w = Weather::new(test_support::client_for(&server));
        let data = w.by_city_name("London").await.unwrap();

        assert_eq!(data.name, "London");
        assert_eq!(data.main.temp, 289.5);
    }

    #[tokio::test]
    async fn every_operation_hits_weather_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
            .expect(4)
            .mount(&server)
            .await;

        let w = Weather::new(test_support::client_for(&server));
        for result in all_operations(&w).await {
            assert_eq!(result.unwrap().name, "London");
        }

        let requests = server.received_requests().await.unwrap();
        let zip = query_of(&requests[3].url);
        assert_eq!(zip, expected(&[("zip", "94040,us"), ("appid", API_KEY)]));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let w = Weather::new(test_support::client_for(&server));
        for result in all_operations(&w).await {
            assert!(result.unwrap_err().is_decode());
        }
    }

    #[tokio::test]
    async fn mismatched_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(WRONG_TYPE))
            .mount(&server)
            .await;

        let w = Weather::new(test_support::client_for(&server));
        assert!(w.by_city_name("London").await.unwrap_err().is_decode());
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let w = Weather::new(test_support::refused_client());

        for result in all_operations(&w).await {
            assert!(result.unwrap_err().is_transport());
        }
    }
}
