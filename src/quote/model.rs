use chrono::NaiveDate;
use serde::Serialize;

/// The three ETFs used as a US market summary: S&P 500, Dow Jones and Nasdaq-100 trackers.
pub const DEFAULT_INDEX_SYMBOLS: [&str; 3] = ["SPY", "DIA", "QQQ"];

/// Human-readable label for the well-known index trackers; other symbols pass through.
#[must_use]
pub fn display_name(symbol: &str) -> String {
    match symbol {
        "SPY" => "S&P 500 (SPY)".to_string(),
        "DIA" => "Dow Jones Industrial (DIA)".to_string(),
        "QQQ" => "Nasdaq Composite (QQQ)".to_string(),
        other => other.to_string(),
    }
}

/// A latest-session quote snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    /// Absolute change against the previous close.
    pub change: f64,
    /// Change against the previous close, in percent (`-0.43` means -0.43%).
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub latest_trading_day: NaiveDate,
    pub previous_close: Option<f64>,
}

impl Quote {
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.change < 0.0
    }
}

/// One symbol that did not produce a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub message: String,
}

/// The outcome of a quote fan-out: every success plus every failure.
///
/// A partial failure has both `quotes` and `failures` populated ("succeeded with
/// warnings"). Look quotes up by symbol with [`QuoteBatchResult::quote`]; their order
/// is not tied to the requested symbol order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteBatchResult {
    pub quotes: Vec<Quote>,
    pub failures: Vec<SymbolFailure>,
}

impl QuoteBatchResult {
    /// Summary of every failure, `"DIA: reason; QQQ: reason"`, or `None` when all succeeded.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(|f| format!("{}: {}", f.symbol, f.message))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// The last failure's message alone.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.failures.last().map(|f| f.message.as_str())
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.quotes.is_empty() && !self.failures.is_empty()
    }

    #[must_use]
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// The published snapshot of a [`QuoteAggregator`](super::QuoteAggregator).
#[derive(Debug, Clone, Default)]
pub struct QuotesState {
    pub quotes: Vec<Quote>,
    /// `true` from the start of a fetch until every symbol has settled.
    pub is_loading: bool,
    pub error: Option<String>,
}
