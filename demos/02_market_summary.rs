use market_pulse::{PulseClientBuilder, QuoteAggregator, TimeSeriesFetcher, quote::display_name};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    market_pulse::init_tracing_for_tests();

    // Reads ALPHA_VANTAGE_API_KEY.
    let client = PulseClientBuilder::from_env()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    // 1. Index tracker quotes, fetched concurrently. One failure does not hide the rest.
    let quotes = QuoteAggregator::new(&client);
    let batch = quotes.fetch_indices().await;
    println!("--- US market summary ---");
    for q in &batch.quotes {
        println!(
            "{:<28} {:>10.2} {:>+8.2} ({:+.2}%)",
            display_name(&q.symbol),
            q.price,
            q.change,
            q.change_percent
        );
    }
    if let Some(err) = batch.error_message() {
        println!("Some symbols failed: {err}");
    }
    println!();

    // 2. Daily closes for a chart.
    let fetcher = TimeSeriesFetcher::new(&client);
    match fetcher.fetch_daily_series("SPY").await {
        Ok(series) => {
            println!("--- SPY daily closes ({} days) ---", series.len());
            if let Some((lo, hi)) = series.close_range() {
                println!("Range: {lo:.2} .. {hi:.2}");
            }
            for p in series.chronological().rev().take(5) {
                println!("  {}: {:.2}", p.date, p.close);
            }
            println!("Latest close: {:?}", series.latest.close);
        }
        Err(e) => println!("Daily series unavailable: {e}"),
    }

    Ok(())
}
