use std::time::Duration;

use httpmock::Method::GET;

use crate::common::{client_for, mock_global_quote, setup_server};
use market_pulse::QuoteAggregator;
use market_pulse::quote::{display_name, quotes};

#[tokio::test]
async fn offline_index_summary_survives_one_failing_symbol() {
    let server = setup_server();
    let spy = mock_global_quote(&server, "SPY");
    let qqq = mock_global_quote(&server, "QQQ");
    let dia = server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "GLOBAL_QUOTE")
            .query_param("symbol", "DIA");
        then.status(500)
            .delay(Duration::from_millis(300))
            .body("internal error");
    });

    let agg = QuoteAggregator::new(&client_for(&server));

    let mut rx = agg.subscribe();
    let initial = rx.borrow().is_loading;
    let loading_seen = async move {
        let mut seen = vec![initial];
        while rx.changed().await.is_ok() {
            let loading = rx.borrow_and_update().is_loading;
            seen.push(loading);
            if !loading {
                break;
            }
        }
        seen
    };

    // While DIA is still in flight nothing from the batch is visible yet.
    let (batch, mid, seen) = tokio::join!(
        agg.fetch_indices(),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            agg.state().snapshot()
        },
        loading_seen
    );
    assert!(mid.is_loading);
    assert!(mid.quotes.is_empty());
    assert_eq!(seen, [false, true, false]);
    let lowered = seen.windows(2).filter(|w| **w == [true, false]).count();
    assert_eq!(lowered, 1);

    spy.assert();
    qqq.assert();
    dia.assert();

    assert_eq!(batch.quotes.len(), 2);
    assert!(batch.is_partial());
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].symbol, "DIA");

    let spy_quote = batch.quote("SPY").unwrap();
    assert_eq!(spy_quote.price, 511.25);
    assert_eq!(spy_quote.change_percent, 0.442);
    assert_eq!(spy_quote.volume, 61_234_500);
    assert!(!spy_quote.is_down());
    assert!(batch.quote("qqq").unwrap().is_down());

    let state = agg.state().snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.quotes.len(), 2);
    let err = state.error.unwrap();
    assert!(err.starts_with("DIA: "), "{err}");
    assert!(err.contains("500"), "{err}");
}

#[tokio::test]
async fn offline_free_function_matches_aggregator() {
    let server = setup_server();
    let _spy = mock_global_quote(&server, "SPY");

    let batch = quotes(&client_for(&server), ["SPY"]).await;
    assert!(batch.failures.is_empty());
    assert_eq!(batch.error_message(), None);
    assert_eq!(batch.quotes[0].previous_close, Some(509.0));
    assert_eq!(display_name(&batch.quotes[0].symbol), "S&P 500 (SPY)");
}

#[tokio::test]
async fn offline_empty_symbol_list_is_an_empty_success() {
    let server = setup_server();
    let any = server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200).body("{}");
    });

    let agg = QuoteAggregator::new(&client_for(&server));
    let batch = agg.fetch_quotes(Vec::<String>::new()).await;
    any.assert_hits(0);

    assert!(batch.quotes.is_empty() && batch.failures.is_empty());
    let state = agg.state().snapshot();
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn offline_overlapping_fetches_stay_loading_until_the_last_settles() {
    let server = setup_server();
    let _spy = mock_global_quote(&server, "SPY");
    let _slow = server.mock(|when, then| {
        when.method(GET).path("/query").query_param("symbol", "DIA");
        then.status(503).delay(Duration::from_millis(300));
    });

    let agg = QuoteAggregator::new(&client_for(&server));

    let (slow, after_fast) = tokio::join!(agg.fetch_quotes(["DIA"]), async {
        let fast = agg.fetch_quotes(["SPY"]).await;
        (fast, agg.state().snapshot())
    });
    let (fast, mid) = after_fast;

    assert_eq!(fast.quotes.len(), 1);
    assert!(mid.is_loading, "slow call still in flight");
    assert_eq!(mid.quotes.len(), 1);

    assert_eq!(slow.failures.len(), 1);
    let state = agg.state().snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.quotes.len(), 1, "all-failed batch keeps SPY");
    assert!(state.error.unwrap().starts_with("DIA: "));
}
