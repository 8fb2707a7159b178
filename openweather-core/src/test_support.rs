use std::{net::TcpListener, sync::Arc};

use wiremock::MockServer;

use crate::client::Client;

pub const API_KEY: &str = "test-key-123";

pub fn client_for(server: &MockServer) -> Arc<Client> {
    let client = Client::with_base_url(API_KEY, &server.uri()).expect("mock server uri");
    Arc::new(client)
}

/// A client pointed at a local port nothing listens on.
pub fn refused_client() -> Arc<Client> {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let base_url = format!("http://{addr}");
    let client = Client::with_base_url(API_KEY, &base_url).expect("valid url");
    Arc::new(client)
}

pub fn query_of(url: &url::Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn expected(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
