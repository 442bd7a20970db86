use chrono::NaiveDate;
use httpmock::Method::GET;

use crate::common::{client_for, fixture, mock_daily_series, setup_server};
use market_pulse::{PulseError, TimeSeriesFetcher, history::daily_series};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn offline_unparseable_close_is_dropped_and_latest_follows_points() {
    let server = setup_server();
    let mock = mock_daily_series(&server, "SPY", fixture("time_series_daily", "SPY", "json"));

    let fetcher = TimeSeriesFetcher::new(&client_for(&server));
    let series = fetcher.fetch_daily_series("SPY").await.unwrap();
    mock.assert();

    assert_eq!(series.meta.symbol, "SPY");
    assert_eq!(series.meta.last_refreshed.as_deref(), Some("2024-01-03"));
    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].date, day("2024-01-02"));
    assert_eq!(series.points[0].close, 100.5);

    assert_eq!(series.latest.close, Some(100.5));
    assert_eq!(series.latest.open, Some(99.0));
    assert_eq!(series.latest.high, Some(101.25));
    assert_eq!(series.latest.low, Some(98.75));
    assert_eq!(series.latest.volume, Some(1500));

    let state = fetcher.state().snapshot();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.series, Some(series));
}

#[tokio::test]
async fn offline_points_are_newest_first_and_chronological_reverses() {
    let server = setup_server();
    let body = r#"{
        "Meta Data": { "2. Symbol": "QQQ", "3. Last Refreshed": "2024-01-05" },
        "Time Series (Daily)": {
            "2024-01-03": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "3.0", "5. volume": "10" },
            "2024-01-05": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "5.0", "5. volume": "10" },
            "2024-01-04": { "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "4.0", "5. volume": "10" }
        }
    }"#;
    let _mock = mock_daily_series(&server, "QQQ", body.to_string());

    let series = daily_series(&client_for(&server), "QQQ").await.unwrap();
    let dates: Vec<_> = series.points.iter().map(|p| p.date).collect();
    assert_eq!(dates, [day("2024-01-05"), day("2024-01-04"), day("2024-01-03")]);
    assert_eq!(series.latest.close, Some(5.0));

    let closes: Vec<_> = series.chronological().map(|p| p.close).collect();
    assert_eq!(closes, [3.0, 4.0, 5.0]);
    assert_eq!(series.close_range(), Some((3.0, 5.0)));
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_series() {
    let server = setup_server();
    let mut ok = mock_daily_series(&server, "SPY", fixture("time_series_daily", "SPY", "json"));

    let fetcher = TimeSeriesFetcher::new(&client_for(&server));
    fetcher.fetch_daily_series("SPY").await.unwrap();
    ok.delete();

    let _down = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(502);
    });
    let err = fetcher.fetch_daily_series("SPY").await.unwrap_err();
    assert!(matches!(err, PulseError::Status { status: 502, .. }));

    let state = fetcher.state().snapshot();
    assert!(!state.is_loading);
    assert!(state.error.is_some());
    assert_eq!(state.series.map(|s| s.len()), Some(1));
}

#[tokio::test]
async fn invalid_key_notice_is_an_api_error() {
    let server = setup_server();
    let _mock = mock_daily_series(
        &server,
        "SPY",
        r#"{"Error Message":"Invalid API call. Please retry or visit the documentation."}"#
            .to_string(),
    );

    let err = daily_series(&client_for(&server), "SPY").await.unwrap_err();
    assert!(matches!(err, PulseError::Api(ref m) if m.starts_with("Invalid API call")));
}
