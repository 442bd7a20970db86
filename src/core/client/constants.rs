//! Centralized constants for default endpoints, env vars and UA.

/// Default UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("market-pulse/", env!("CARGO_PKG_VERSION"));

/// NewsAPI v2 base (the `everything` path is appended).
pub(crate) const DEFAULT_BASE_NEWS: &str = "https://newsapi.org/v2/";

/// Alpha Vantage query endpoint, shared by `GLOBAL_QUOTE` and `TIME_SERIES_DAILY`.
pub(crate) const DEFAULT_BASE_MARKET: &str = "https://www.alphavantage.co/query";

/// OpenAI-compatible API base (the `chat/completions` path is appended).
pub(crate) const DEFAULT_BASE_SIMPLIFY: &str = "https://api.openai.com/v1/";

pub(crate) const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub(crate) const ENV_MARKET_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
pub(crate) const ENV_SIMPLIFY_API_KEY: &str = "OPENAI_API_KEY";
