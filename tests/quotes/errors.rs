use httpmock::Method::GET;

use crate::common::{client_for, mock_global_quote, setup_server};
use market_pulse::QuoteAggregator;

#[tokio::test]
async fn all_symbols_failing_keeps_previous_quotes() {
    let server = setup_server();
    let mut ok = mock_global_quote(&server, "SPY");

    let agg = QuoteAggregator::new(&client_for(&server));
    agg.fetch_quotes(["SPY"]).await;
    assert_eq!(agg.state().snapshot().quotes.len(), 1);
    ok.delete();

    let _down = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(503);
    });
    let batch = agg.fetch_quotes(["SPY", "QQQ"]).await;
    assert!(batch.quotes.is_empty());
    assert_eq!(batch.failures.len(), 2);

    let state = agg.state().snapshot();
    assert_eq!(state.quotes.len(), 1, "stale quotes stay visible");
    assert_eq!(state.quotes[0].symbol, "SPY");
    let err = state.error.unwrap();
    assert!(err.contains("SPY: ") && err.contains("QQQ: ") && err.contains("; "), "{err}");
}

#[tokio::test]
async fn empty_quote_node_is_an_empty_response() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/query").query_param("symbol", "ZZZZ");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"Global Quote":{}}"#);
    });

    let agg = QuoteAggregator::new(&client_for(&server));
    let batch = agg.fetch_quotes(["ZZZZ"]).await;
    assert_eq!(batch.failures.len(), 1);
    assert!(batch.failures[0].message.to_lowercase().contains("empty"), "{:?}", batch.failures);
    assert!(
        !batch.failures[0].message.contains("test-market-key"),
        "key leaked: {:?}",
        batch.failures
    );
}

#[tokio::test]
async fn rate_limit_note_is_reported_per_symbol() {
    let server = setup_server();
    let _spy = mock_global_quote(&server, "SPY");
    let _note = server.mock(|when, then| {
        when.method(GET).path("/query").query_param("symbol", "DIA");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"Note":"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#);
    });

    let agg = QuoteAggregator::new(&client_for(&server));
    let batch = agg.fetch_quotes(["SPY", "DIA"]).await;
    assert_eq!(batch.quotes.len(), 1);
    assert_eq!(batch.last_error().map(|m| m.contains("call frequency")), Some(true));
}
