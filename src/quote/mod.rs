mod api;
mod model;
mod wire;

pub use model::{
    DEFAULT_INDEX_SYMBOLS, Quote, QuoteBatchResult, QuotesState, SymbolFailure, display_name,
};

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::{InFlight, PulseClient, Published};

/* ---------------- Public API ---------------- */

/// Fetch quotes for `symbols` concurrently without going through an aggregator.
pub async fn quotes<I, S>(client: &PulseClient, symbols: I) -> QuoteBatchResult
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
    fan_out(client, &symbols).await
}

/// Fans out one quote request per symbol and publishes the settled batch.
///
/// Requests run concurrently and are joined with an all-settled barrier: one symbol's
/// failure never cancels or hides the others. `is_loading` is raised when a call
/// starts and lowered in the update that publishes the last overlapping call's batch.
pub struct QuoteAggregator {
    client: PulseClient,
    state: Published<QuotesState>,
    in_flight: InFlight,
}

impl QuoteAggregator {
    pub fn new(client: &PulseClient) -> Self {
        Self {
            client: client.clone(),
            state: Published::default(),
            in_flight: InFlight::default(),
        }
    }

    /// The published state container.
    pub const fn state(&self) -> &Published<QuotesState> {
        &self.state
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<QuotesState> {
        self.state.subscribe()
    }

    /// Fetches [`DEFAULT_INDEX_SYMBOLS`].
    pub async fn fetch_indices(&self) -> QuoteBatchResult {
        self.fetch_quotes(DEFAULT_INDEX_SYMBOLS).await
    }

    /// Fetches one quote per symbol and waits for all of them to settle.
    ///
    /// The published quotes are replaced by the batch's successes. When every symbol
    /// failed the previously published quotes stay and only the error changes.
    #[tracing::instrument(skip_all)]
    pub async fn fetch_quotes<I, S>(&self, symbols: I) -> QuoteBatchResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();

        self.state.update(|s| {
            self.in_flight.start();
            s.is_loading = true;
            s.error = None;
        });

        let batch = fan_out(&self.client, &symbols).await;

        let published = batch.clone();
        self.state.update(move |s| {
            let all_failed = published.quotes.is_empty() && !published.failures.is_empty();
            s.error = published.error_message();
            if !all_failed {
                s.quotes = published.quotes;
            }
            s.is_loading = self.in_flight.finish();
        });
        batch
    }
}

async fn fan_out(client: &PulseClient, symbols: &[String]) -> QuoteBatchResult {
    let settled = join_all(symbols.iter().map(|sym| async move {
        let res = api::fetch_quote(client, sym).await;
        (sym, res)
    }))
    .await;

    let mut batch = QuoteBatchResult::default();
    for (sym, res) in settled {
        match res {
            Ok(q) => batch.quotes.push(q),
            Err(e) => {
                warn!(symbol = %sym, error = %e, "quote fetch failed");
                batch.failures.push(SymbolFailure {
                    symbol: sym.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    debug!(
        requested = symbols.len(),
        ok = batch.quotes.len(),
        failed = batch.failures.len(),
        "quote batch settled"
    );
    batch
}
