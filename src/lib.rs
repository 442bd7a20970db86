//! market-pulse: async aggregation of a news feed, stock quotes and daily price series.
//!
//! Three independent aggregators sit on top of one shared [`PulseClient`]:
//!
//! - [`NewsFeedAggregator`] fetches articles, reconciles bookmark flags from a
//!   [`BookmarkStore`] and rebuilds a [`SuggestionIndex`] from the fetched text.
//! - [`QuoteAggregator`] fans out one quote request per symbol and joins them with an
//!   all-settled barrier, so partial failures still yield the successful quotes.
//! - [`TimeSeriesFetcher`] turns a date-keyed daily series into a newest-first
//!   [`PricePoint`] sequence plus the latest day's fields.
//!
//! Each aggregator publishes its state through a [`Published`] container that callers
//! can snapshot or subscribe to.

pub mod bookmarks;
pub mod core;
pub mod history;
pub mod news;
pub mod quote;
pub mod simplify;
pub mod suggest;

pub use bookmarks::{BookmarkStore, JsonFileStore, KeyValueStore, MemoryStore};
pub use crate::core::{PulseClient, PulseClientBuilder, PulseError, Published};
pub use history::{DailySeries, LatestDay, PricePoint, SeriesMeta, SeriesState, TimeSeriesFetcher};
pub use news::{Article, NewsFeedAggregator, NewsFeedState, SortBy};
pub use quote::{Quote, QuoteAggregator, QuoteBatchResult, QuotesState, SymbolFailure};
pub use simplify::{ChatSimplifier, TextSimplifier};
pub use suggest::SuggestionIndex;

/// Install a `fmt` subscriber honouring `RUST_LOG`. Intended for demos and tests.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing_for_tests() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
