mod api;
mod model;
mod wire;

pub use api::MAX_PAGE_SIZE;
pub use model::{Article, NewsFeedState, SortBy};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    bookmarks::BookmarkStore,
    core::{InFlight, PulseClient, PulseError, Published},
    simplify::TextSimplifier,
    suggest::SuggestionIndex,
};

/// Fetches the news feed, reconciles bookmark flags and maintains the suggestion index.
///
/// The aggregator owns a [`Published<NewsFeedState>`]; every fetch, toggle and search
/// edit replaces that snapshot and notifies subscribers. A failed fetch records its
/// error but keeps the previously loaded articles.
///
/// # Example
///
/// ```no_run
/// # use market_pulse::{BookmarkStore, NewsFeedAggregator, PulseClientBuilder};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PulseClientBuilder::from_env().build()?;
/// let feed = NewsFeedAggregator::new(&client, BookmarkStore::in_memory());
///
/// let articles = feed.fetch_feed("business", 100).await?;
/// println!("loaded {} articles", articles.len());
/// for a in feed.filtered_articles("oil") {
///     println!("{} ({})", a.title, a.published_at);
/// }
/// # Ok(())
/// # }
/// ```
pub struct NewsFeedAggregator {
    client: PulseClient,
    bookmarks: BookmarkStore,
    simplifier: Option<Arc<dyn TextSimplifier>>,
    language: String,
    sort_by: SortBy,
    state: Published<NewsFeedState>,
    in_flight: InFlight,
}

impl NewsFeedAggregator {
    /// Creates an aggregator with English results sorted by publication time.
    pub fn new(client: &PulseClient, bookmarks: BookmarkStore) -> Self {
        Self {
            client: client.clone(),
            bookmarks,
            simplifier: None,
            language: "en".to_string(),
            sort_by: SortBy::default(),
            state: Published::default(),
            in_flight: InFlight::default(),
        }
    }

    /// Sets the language filter sent to the news endpoint.
    #[must_use]
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = lang.into();
        self
    }

    /// Sets the result ordering requested from the news endpoint.
    #[must_use]
    pub const fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by = sort;
        self
    }

    /// Attaches a text simplifier used by [`simplify_article`](Self::simplify_article).
    #[must_use]
    pub fn simplifier(mut self, s: Arc<dyn TextSimplifier>) -> Self {
        self.simplifier = Some(s);
        self
    }

    /// The published state container.
    pub const fn state(&self) -> &Published<NewsFeedState> {
        &self.state
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<NewsFeedState> {
        self.state.subscribe()
    }

    /// A clone of the currently loaded articles.
    pub fn articles(&self) -> Vec<Article> {
        self.state.read(|s| s.articles.clone())
    }

    /// Fetches articles for `query` and replaces the loaded feed.
    ///
    /// `page_size` is clamped to `1..=`[`MAX_PAGE_SIZE`]. Articles with unparseable
    /// timestamps are dropped individually. Every retained article's bookmark flag is
    /// re-read from the [`BookmarkStore`], and the suggestion index is rebuilt from the
    /// retained titles and descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::Transport`] or [`PulseError::Status`] for network failures,
    /// [`PulseError::Json`] or [`PulseError::Decode`] for schema mismatches and
    /// [`PulseError::Api`] when the endpoint reports an error. The previously loaded
    /// feed is left untouched.
    #[tracing::instrument(skip(self), err)]
    pub async fn fetch_feed(&self, query: &str, page_size: u32) -> Result<Vec<Article>, PulseError> {
        self.state.update(|s| {
            self.in_flight.start();
            s.is_loading = true;
            s.error = None;
        });

        let fetched = api::fetch_articles(
            &self.client,
            query,
            &self.language,
            self.sort_by,
            page_size,
        )
        .await;

        let mut articles = match fetched {
            Ok(a) => a,
            Err(e) => {
                self.state.update(|s| {
                    s.is_loading = self.in_flight.finish();
                    s.error = Some(e.to_string());
                });
                return Err(e);
            }
        };

        let saved = self.bookmarks.load();
        for a in &mut articles {
            a.is_bookmarked = saved.contains(&a.url);
        }

        let suggestions = SuggestionIndex::rebuild(
            articles
                .iter()
                .flat_map(|a| std::iter::once(a.title.as_str()).chain(a.description.as_deref())),
        );
        debug!(
            articles = articles.len(),
            bookmarked = articles.iter().filter(|a| a.is_bookmarked).count(),
            tokens = suggestions.len(),
            "feed refreshed"
        );

        let published = articles.clone();
        self.state.update(move |s| {
            s.articles = published;
            s.suggestions = suggestions;
            s.is_loading = self.in_flight.finish();
            s.error = None;
        });
        Ok(articles)
    }

    /// Articles whose title or description contains `search_text`, ignoring case.
    ///
    /// An empty `search_text` returns every loaded article in fetch order.
    pub fn filtered_articles(&self, search_text: &str) -> Vec<Article> {
        let needle = search_text.to_lowercase();
        self.state.read(|s| {
            if needle.is_empty() {
                return s.articles.clone();
            }
            s.articles.iter().filter(|a| a.matches(&needle)).cloned().collect()
        })
    }

    /// [`filtered_articles`](Self::filtered_articles) for the current search text.
    pub fn visible_articles(&self) -> Vec<Article> {
        let text = self.state.read(|s| s.search_text.clone());
        self.filtered_articles(&text)
    }

    /// Bookmarked articles in fetch order.
    pub fn bookmarked_articles(&self) -> Vec<Article> {
        self.state
            .read(|s| s.articles.iter().filter(|a| a.is_bookmarked).cloned().collect())
    }

    /// Flips the bookmark flag of the article with `article_id` and persists the change.
    ///
    /// Returns the new flag, or `None` when no loaded article has that id (for instance
    /// after a refresh replaced the feed); that case writes nothing.
    pub fn toggle_bookmark(&self, article_id: &str) -> Option<bool> {
        let mut toggled: Option<(String, bool)> = None;
        self.state.update_if(|s| {
            let Some(a) = s.articles.iter_mut().find(|a| a.id == article_id) else {
                return false;
            };
            a.is_bookmarked = !a.is_bookmarked;
            toggled = Some((a.url.clone(), a.is_bookmarked));
            true
        });

        let Some((url, now)) = toggled else {
            debug!(article_id, "toggle for unknown article ignored");
            return None;
        };

        let mut saved = self.bookmarks.load();
        if now {
            saved.insert(url);
        } else {
            saved.remove(&url);
        }
        self.bookmarks.save(&saved);
        Some(now)
    }

    /// Up to `limit` suggestion tokens for `prefix`.
    pub fn suggestions_for(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.state.read(|s| s.suggestions.suggestions_for(prefix, limit))
    }

    /// Up to `limit` suggestion tokens for the current search text.
    pub fn filtered_suggestions(&self, limit: usize) -> Vec<String> {
        self.state
            .read(|s| s.suggestions.suggestions_for(&s.search_text, limit))
    }

    /// Replaces the current search text.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.update_if(|s| {
            if s.search_text == text {
                return false;
            }
            s.search_text = text;
            true
        });
    }

    /// Accepts a suggestion as the new search text.
    pub fn select_suggestion(&self, suggestion: &str) {
        self.set_search_text(suggestion);
    }

    /// Asks the configured [`TextSimplifier`] for plain-language versions of an
    /// article's title and description.
    ///
    /// Best effort: returns `false` without error when no simplifier is configured, the
    /// id is unknown, the service produced nothing, or the article vanished in a
    /// refresh while the request was in flight.
    pub async fn simplify_article(&self, article_id: &str) -> bool {
        let Some(simplifier) = self.simplifier.clone() else {
            return false;
        };
        let Some((title, description)) = self.state.read(|s| {
            s.articles
                .iter()
                .find(|a| a.id == article_id)
                .map(|a| (a.title.clone(), a.description.clone()))
        }) else {
            return false;
        };

        let (simple_title, simple_description) = futures::join!(
            simplifier.simplify(&title),
            async {
                match description.as_deref() {
                    Some(d) => simplifier.simplify(d).await,
                    None => None,
                }
            }
        );

        if simple_title.is_none() && simple_description.is_none() {
            warn!(article_id, "simplifier returned nothing");
            return false;
        }

        self.state.update_if(|s| {
            let Some(a) = s.articles.iter_mut().find(|a| a.id == article_id) else {
                return false;
            };
            if simple_title.is_some() {
                a.simplified_title = simple_title;
            }
            if simple_description.is_some() {
                a.simplified_description = simple_description;
            }
            true
        })
    }
}
