use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    core::{PulseClient, PulseError, net},
    news::{Article, SortBy, wire},
};

/// Upstream cap on `pageSize`.
pub const MAX_PAGE_SIZE: u32 = 100;

pub(super) async fn fetch_articles(
    client: &PulseClient,
    query: &str,
    language: &str,
    sort_by: SortBy,
    page_size: u32,
) -> Result<Vec<Article>, PulseError> {
    let key = client.news_api_key()?;
    let mut url = client.base_news().join("everything")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("language", language)
        .append_pair("sortBy", sort_by.as_str())
        .append_pair("pageSize", &page_size.clamp(1, MAX_PAGE_SIZE).to_string())
        .append_pair("apiKey", key);

    let body = net::get_text(client, url, "news").await?;
    decode_articles(&body)
}

pub(super) fn decode_articles(body: &str) -> Result<Vec<Article>, PulseError> {
    let envelope: wire::NewsEnvelope = serde_json::from_str(body)?;

    if envelope.status.as_deref() == Some("error") {
        return Err(PulseError::Api(format!(
            "{}: {}",
            envelope.code.as_deref().unwrap_or("unknown"),
            envelope.message.as_deref().unwrap_or("no message")
        )));
    }

    let raw = envelope
        .articles
        .ok_or_else(|| PulseError::Decode("missing articles".into()))?;
    let total = raw.len();

    let articles: Vec<Article> = raw
        .into_iter()
        .filter_map(|item| {
            let (Some(title), Some(url)) = (item.title, item.url) else {
                debug!("dropping article without title or url");
                return None;
            };
            let published = item.published_at.as_deref().unwrap_or_default();
            let Ok(published_at) = DateTime::parse_from_rfc3339(published) else {
                debug!(%url, published, "dropping article with unparseable publishedAt");
                return None;
            };

            Some(Article {
                id: url.clone(),
                title,
                description: item.description,
                url,
                image_url: item.url_to_image,
                published_at: published_at.with_timezone(&Utc),
                is_bookmarked: false,
                simplified_title: None,
                simplified_description: None,
            })
        })
        .collect();

    debug!(kept = articles.len(), total, "decoded news feed");
    Ok(articles)
}
