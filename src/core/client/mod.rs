//! Public client surface + builder.
//! Defaults (endpoints, UA, env var names) live in `constants`.

mod constants;

use crate::core::PulseError;
use constants::{
    DEFAULT_BASE_MARKET, DEFAULT_BASE_NEWS, DEFAULT_BASE_SIMPLIFY, ENV_MARKET_API_KEY,
    ENV_NEWS_API_KEY, ENV_SIMPLIFY_API_KEY, USER_AGENT,
};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Thin wrapper that holds a configured HTTP client, base URLs and API keys.
///
/// Cloning is cheap; every aggregator keeps its own clone.
#[derive(Debug, Clone)]
pub struct PulseClient {
    http: Client,
    base_news: Url,
    base_market: Url,
    base_simplify: Url,

    news_api_key: Option<String>,
    market_api_key: Option<String>,
    simplify_api_key: Option<String>,
}

impl PulseClient {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> PulseClientBuilder {
        PulseClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) const fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) const fn base_news(&self) -> &Url {
        &self.base_news
    }
    pub(crate) const fn base_market(&self) -> &Url {
        &self.base_market
    }
    pub(crate) const fn base_simplify(&self) -> &Url {
        &self.base_simplify
    }

    pub(crate) fn news_api_key(&self) -> Result<&str, PulseError> {
        self.news_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PulseError::MissingApiKey("news endpoint"))
    }

    pub(crate) fn market_api_key(&self) -> Result<&str, PulseError> {
        self.market_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PulseError::MissingApiKey("market data endpoint"))
    }

    pub(crate) fn simplify_api_key(&self) -> Result<&str, PulseError> {
        self.simplify_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PulseError::MissingApiKey("text simplifier"))
    }

    /// Every configured key, for redacting URLs before they are logged or returned.
    pub(crate) fn secrets(&self) -> impl Iterator<Item = &str> {
        [
            self.news_api_key.as_deref(),
            self.market_api_key.as_deref(),
            self.simplify_api_key.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|k| !k.is_empty())
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct PulseClientBuilder {
    user_agent: Option<String>,
    base_news: Option<Url>,
    base_market: Option<Url>,
    base_simplify: Option<Url>,

    news_api_key: Option<String>,
    market_api_key: Option<String>,
    simplify_api_key: Option<String>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl PulseClientBuilder {
    /// Seed the API keys from `NEWS_API_KEY`, `ALPHA_VANTAGE_API_KEY` and `OPENAI_API_KEY`.
    ///
    /// Unset variables leave the corresponding key empty; requests to that endpoint then
    /// fail with [`PulseError::MissingApiKey`].
    #[must_use]
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            news_api_key: var(ENV_NEWS_API_KEY),
            market_api_key: var(ENV_MARKET_API_KEY),
            simplify_api_key: var(ENV_SIMPLIFY_API_KEY),
            ..Self::default()
        }
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the news API base (e.g., `https://newsapi.org/v2/`).
    #[must_use]
    pub fn base_news(mut self, url: Url) -> Self {
        self.base_news = Some(url);
        self
    }

    /// Override the market data query endpoint (e.g., `https://www.alphavantage.co/query`).
    #[must_use]
    pub fn base_market(mut self, url: Url) -> Self {
        self.base_market = Some(url);
        self
    }

    /// Override the chat-completions API base (e.g., `https://api.openai.com/v1/`).
    #[must_use]
    pub fn base_simplify(mut self, url: Url) -> Self {
        self.base_simplify = Some(url);
        self
    }

    #[must_use]
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn market_api_key(mut self, key: impl Into<String>) -> Self {
        self.market_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn simplify_api_key(mut self, key: impl Into<String>) -> Self {
        self.simplify_api_key = Some(key.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a default base URL fails to parse or the HTTP client cannot
    /// be initialized.
    pub fn build(self) -> Result<PulseClient, PulseError> {
        let base_news = match self.base_news {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_NEWS)?,
        };
        let base_market = match self.base_market {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_MARKET)?,
        };
        let base_simplify = match self.base_simplify {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_SIMPLIFY)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(PulseClient {
            http,
            base_news,
            base_market,
            base_simplify,
            news_api_key: self.news_api_key,
            market_api_key: self.market_api_key,
            simplify_api_key: self.simplify_api_key,
        })
    }
}
