/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for coinpaprika-api tests

use coinpaprika_api::{ParamValue, Params, Transport};
use url::Url;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// API root on the mock server, shaped like the real `/v1/` base
pub fn api_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/v1/", server.uri())).expect("mock server url")
}

/// Transport bound to the current test runtime
pub fn transport() -> Transport {
    Transport::new().expect("transport")
}

pub fn params(pairs: &[(&str, ParamValue)]) -> Params {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Two news items as returned by the news endpoint
pub fn news_fixture() -> serde_json::Value {
    serde_json::json!([
        {
            "title": "Bitcoin hits new high",
            "url": "https://coinpaprika.com/news/btc-high",
            "news_date": "2019-01-03T10:15:00Z"
        },
        {
            "title": "Ethereum upgrade scheduled",
            "url": "https://coinpaprika.com/news/eth-upgrade",
            "news_date": "2019-01-04T08:00:00Z"
        }
    ])
}
