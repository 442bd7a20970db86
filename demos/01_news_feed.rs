use std::sync::Arc;

use market_pulse::{
    BookmarkStore, ChatSimplifier, JsonFileStore, NewsFeedAggregator, PulseClientBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    market_pulse::init_tracing_for_tests();

    // Reads NEWS_API_KEY and, optionally, OPENAI_API_KEY.
    let client = PulseClientBuilder::from_env().build()?;

    let store = JsonFileStore::new(std::env::temp_dir().join("market-pulse-demo/bookmarks.json"));
    let feed = NewsFeedAggregator::new(&client, BookmarkStore::new(Arc::new(store)))
        .simplifier(Arc::new(ChatSimplifier::new(&client)));

    // 1. Fetch the latest business headlines.
    let articles = feed.fetch_feed("business", 20).await?;
    println!("--- {} business headlines ---", articles.len());
    for a in articles.iter().take(5) {
        let mark = if a.is_bookmarked { "*" } else { " " };
        println!("{mark} [{}] {}", a.published_at.format("%Y-%m-%d %H:%M"), a.title);
    }
    println!();

    // 2. Search suggestions and filtering.
    feed.set_search_text("ma");
    println!("Suggestions for 'ma': {:?}", feed.filtered_suggestions(5));
    if let Some(first) = feed.filtered_suggestions(1).into_iter().next() {
        feed.select_suggestion(&first);
        println!("{} article(s) mention '{first}'", feed.visible_articles().len());
    }
    println!();

    // 3. Bookmark the top story; the flag survives the next run.
    if let Some(top) = articles.first() {
        let now = feed.toggle_bookmark(&top.id);
        println!("Bookmarked '{}': {:?}", top.title, now);

        // 4. Plain-language rewrite, best effort.
        if feed.simplify_article(&top.id).await {
            let updated = feed.articles().into_iter().find(|a| a.id == top.id);
            if let Some(title) = updated.and_then(|a| a.simplified_title) {
                println!("Simplified: {title}");
            }
        } else {
            println!("(no simplified text; is OPENAI_API_KEY set?)");
        }
    }
    println!("Total bookmarked in this feed: {}", feed.bookmarked_articles().len());

    Ok(())
}
