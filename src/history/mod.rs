mod api;
mod model;
mod wire;

pub use model::{DailySeries, LatestDay, PricePoint, SeriesMeta, SeriesState};

use tokio::sync::watch;

use crate::core::{InFlight, PulseClient, PulseError, Published};

/// Fetch one symbol's daily series without going through a fetcher.
///
/// # Errors
///
/// See [`TimeSeriesFetcher::fetch_daily_series`].
pub async fn daily_series(client: &PulseClient, symbol: &str) -> Result<DailySeries, PulseError> {
    api::fetch_daily(client, symbol).await
}

/// Fetches a symbol's daily price series and publishes it as a chart-ready sequence.
///
/// `points` are stored newest first; charting code draws
/// [`DailySeries::chronological`] left to right.
pub struct TimeSeriesFetcher {
    client: PulseClient,
    state: Published<SeriesState>,
    in_flight: InFlight,
}

impl TimeSeriesFetcher {
    pub fn new(client: &PulseClient) -> Self {
        Self {
            client: client.clone(),
            state: Published::default(),
            in_flight: InFlight::default(),
        }
    }

    /// The published state container.
    pub const fn state(&self) -> &Published<SeriesState> {
        &self.state
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SeriesState> {
        self.state.subscribe()
    }

    /// Fetches and parses the daily series for `symbol`.
    ///
    /// Entries whose close price does not parse are dropped. `latest` comes from the
    /// newest retained entry and is entirely `None` when nothing was retained.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-2xx statuses, empty bodies, schema
    /// mismatches, or an upstream notice (rate limit, bad key) in place of the payload.
    /// The previously published series is kept.
    #[tracing::instrument(skip(self), err)]
    pub async fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, PulseError> {
        self.state.update(|s| {
            self.in_flight.start();
            s.is_loading = true;
            s.error = None;
        });

        match api::fetch_daily(&self.client, symbol).await {
            Ok(series) => {
                let published = series.clone();
                self.state.update(move |s| {
                    s.series = Some(published);
                    s.is_loading = self.in_flight.finish();
                });
                Ok(series)
            }
            Err(e) => {
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.is_loading = self.in_flight.finish();
                });
                Err(e)
            }
        }
    }
}
