#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use market_pulse::{KeyValueStore, PulseClient, PulseError};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{fs, path::Path};
use url::Url;

pub const NEWS_KEY: &str = "test-news-key";
pub const MARKET_KEY: &str = "test-market-key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A client whose news and market endpoints point at `server`.
pub fn client_for(server: &MockServer) -> PulseClient {
    PulseClient::builder()
        .base_news(Url::parse(&format!("{}/v2/", server.base_url())).unwrap())
        .base_market(Url::parse(&format!("{}/query", server.base_url())).unwrap())
        .base_simplify(Url::parse(&format!("{}/v1/", server.base_url())).unwrap())
        .news_api_key(NEWS_KEY)
        .market_api_key(MARKET_KEY)
        .build()
        .unwrap()
}

pub fn mock_news<'a>(server: &'a MockServer, query: &'a str, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v2/everything")
            .query_param("q", query)
            .query_param("language", "en")
            .query_param("sortBy", "publishedAt")
            .query_param("apiKey", NEWS_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_global_quote<'a>(server: &'a MockServer, symbol: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "GLOBAL_QUOTE")
            .query_param("symbol", symbol)
            .query_param("apikey", MARKET_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("global_quote", symbol, "json"));
    })
}

pub fn mock_daily_series<'a>(server: &'a MockServer, symbol: &'a str, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "TIME_SERIES_DAILY")
            .query_param("symbol", symbol)
            .query_param("outputsize", "compact")
            .query_param("apikey", MARKET_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// In-memory store that records every write. Reads can be switched to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub value: Mutex<Option<Vec<String>>>,
    pub writes: Mutex<Vec<Vec<String>>>,
    pub fail_reads: AtomicBool,
}

impl RecordingStore {
    pub fn seeded(urls: &[&str]) -> Self {
        Self {
            value: Mutex::new(Some(urls.iter().map(|s| s.to_string()).collect())),
            writes: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Option<Vec<String>> {
        self.value.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }
}

impl KeyValueStore for RecordingStore {
    fn get_string_list(&self, _key: &str) -> Result<Option<Vec<String>>, PulseError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PulseError::Persistence("read failed".into()));
        }
        Ok(self.value.lock().unwrap().clone())
    }

    fn set_string_list(&self, _key: &str, values: &[String]) -> Result<(), PulseError> {
        *self.value.lock().unwrap() = Some(values.to_vec());
        self.writes.lock().unwrap().push(values.to_vec());
        Ok(())
    }
}
