use chrono::NaiveDate;
use serde::Serialize;

/// One day's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesMeta {
    pub symbol: String,
    /// As sent by the API: a date, or a date and time for intraday refreshes.
    pub last_refreshed: Option<String>,
}

/// Fields of the most recent retained day. All `None` when the series is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatestDay {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// A parsed daily series for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub meta: SeriesMeta,
    /// Newest first. Use [`DailySeries::chronological`] to draw left-to-right.
    pub points: Vec<PricePoint>,
    pub latest: LatestDay,
}

impl DailySeries {
    /// Points oldest first, the order a line chart is drawn in.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &PricePoint> {
        self.points.iter().rev()
    }

    /// `(min, max)` closing price, or `None` for an empty series.
    #[must_use]
    pub fn close_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.close).fold(None, |acc, c| match acc {
            None => Some((c, c)),
            Some((lo, hi)) => Some((lo.min(c), hi.max(c))),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The published snapshot of a [`TimeSeriesFetcher`](super::TimeSeriesFetcher).
#[derive(Debug, Clone, Default)]
pub struct SeriesState {
    /// The last successfully fetched series.
    pub series: Option<DailySeries>,
    pub is_loading: bool,
    pub error: Option<String>,
}
