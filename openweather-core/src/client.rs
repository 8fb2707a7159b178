//! Shared HTTP transport and the request executor every accessor goes through.

use std::{fmt, time::Duration};

use anyhow::Context;
use reqwest::{Method, header::ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Credentials plus a pre-configured `reqwest::Client`.
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Self::with_timeouts(api_key, base_url, CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeouts(
        api_key: impl Into<String>,
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for `path` with the selector `params` in order and `appid` last.
    pub fn endpoint_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("appid", &self.api_key);
        }
        Ok(url)
    }

    /// Sends one request and decodes the whole body as `T`.
    ///
    /// The HTTP status is not checked: upstream reports failures as JSON with
    /// a non-success `cod`, which decodes like any other body.
    pub async fn execute<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T> {
        // Only the path is logged, the query string carries the API key.
        let path = url.path().to_owned();

        let response = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(%path, %status, bytes = body.len(), "received response");

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint_url(path, params)?;
        self.execute(Method::GET, url).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

// reqwest puts the request URL, API key included, into its error message.
fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.without_url())
}

/// Construct a client from the stored configuration.
pub fn client_from_config(config: &Config) -> anyhow::Result<Client> {
    let api_key = config.api_key()?;
    Client::with_base_url(api_key, config.base_url())
        .with_context(|| format!("Failed to create client for {}", config.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::WeatherData, test_support};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    const LONDON: &str = r#"{"cod":"200","main":{"temp":289.5},"name":"London"}"#;
    const NOT_FOUND: &str = r#"{"cod":"404","message":"city not found"}"#;

    #[test]
    fn endpoint_url_appends_api_key_last() {
        let client = Client::new("KEY").unwrap();
        let params = [("q", "London".to_string())];
        let url = client.endpoint_url("weather", &params).unwrap();

        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(
            test_support::query_of(&url),
            test_support::expected(&[("q", "London"), ("appid", "KEY")])
        );
    }

    #[test]
    fn endpoint_url_handles_nested_paths_and_trailing_slash() {
        let base = "http://localhost:8080/api/";
        let client = Client::with_base_url("KEY", base).unwrap();
        let url = client.endpoint_url("/forecast/daily", &[]).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/forecast/daily?appid=KEY"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Client::with_base_url("KEY", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = Client::new("SECRET").unwrap();
        let dbg = format!("{client:?}");

        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains("redacted"));
    }

    #[test]
    fn client_from_config_requires_api_key() {
        let err = client_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn default_timeouts() {
        assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(5));
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn execute_sends_accept_header_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("appid", test_support::API_KEY))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_support::client_for(&server);
        let data: WeatherData = client.get("weather", &[]).await.unwrap();

        assert_eq!(data.name, "London");
        assert_eq!(data.main.temp, 289.5);
    }

    #[tokio::test]
    async fn non_success_status_still_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
            .mount(&server)
            .await;

        let client = test_support::client_for(&server);
        let params = [("q", "Atlantis".to_string())];
        let data: WeatherData = client.get("weather", &params).await.unwrap();

        assert_eq!(data.cod.code(), Some(404));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_api_key() {
        let client = test_support::refused_client();
        let result: Result<WeatherData> = client.get("weather", &[]).await;
        let err = result.unwrap_err();

        assert!(err.is_transport());
        assert!(!err.to_string().contains(test_support::API_KEY));
    }

    #[tokio::test]
    async fn slow_response_times_out_as_transport_error() {
        let server = MockServer::start().await;
        let delay = Duration::from_secs(2);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&server)
            .await;

        let client = Client::with_timeouts(
            test_support::API_KEY,
            &server.uri(),
            CONNECT_TIMEOUT,
            Duration::from_millis(200),
        )
        .unwrap();
        let result: Result<WeatherData> = client.get("weather", &[]).await;

        match result.unwrap_err() {
            Error::Transport(err) => assert!(err.is_timeout()),
            other => panic!("expected a transport error, got {other:?}"),
        }
    }
}
