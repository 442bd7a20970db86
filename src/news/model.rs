use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::suggest::SuggestionIndex;

/// A single news article.
///
/// Identity is the canonical URL: `id` is derived from it and two articles are the same
/// entity iff their URLs match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// Stable identity, equal to `url`.
    pub id: String,
    /// The headline.
    pub title: String,
    /// The standfirst / summary, when the source provides one.
    pub description: Option<String>,
    /// Canonical link to the article.
    pub url: String,
    /// Lead image, when the source provides one.
    pub image_url: Option<String>,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Whether the URL is in the bookmark set. Derived locally, never sent by the API.
    pub is_bookmarked: bool,
    /// Plain-language rewrite of `title`, filled by an explicit simplify call.
    pub simplified_title: Option<String>,
    /// Plain-language rewrite of `description`, filled by an explicit simplify call.
    pub simplified_description: Option<String>,
}

impl Article {
    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Ordering requested from the news endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Newest first.
    #[default]
    PublishedAt,
    /// Closest match to the query first.
    Relevancy,
    /// Most popular sources first.
    Popularity,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublishedAt => "publishedAt",
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
        }
    }
}

/// The published snapshot of a [`NewsFeedAggregator`](super::NewsFeedAggregator).
#[derive(Debug, Clone, Default)]
pub struct NewsFeedState {
    /// Articles from the last successful fetch, in API order.
    pub articles: Vec<Article>,
    /// Tokens from the last successful fetch.
    pub suggestions: SuggestionIndex,
    /// What the user has typed into the search box.
    pub search_text: String,
    pub is_loading: bool,
    /// Display text of the last failed fetch; cleared when a fetch starts.
    pub error: Option<String>,
}
