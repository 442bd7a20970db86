use reqwest::RequestBuilder;
use tracing::debug;
use url::Url;

use crate::core::{PulseClient, PulseError};

/// Replace every query value equal to a configured API key with `***`.
///
/// Works on decoded pairs, so keys that needed percent-encoding are caught and other
/// parts of the URL are never touched.
pub(crate) fn redact(client: &PulseClient, url: &Url) -> String {
    let secrets: Vec<&str> = client.secrets().collect();
    if secrets.is_empty() || url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if secrets.contains(&&*v) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.into()
}

/// GET `url` and return the body text.
///
/// Non-2xx statuses map to [`PulseError::Status`] and a blank body to
/// [`PulseError::EmptyResponse`]; both carry the redacted URL.
pub(crate) async fn get_text(
    client: &PulseClient,
    url: Url,
    endpoint: &str,
) -> Result<String, PulseError> {
    let shown = redact(client, &url);
    debug!(endpoint, url = %shown, "GET");
    send_text(client.http().get(url), shown).await
}

/// Send a prepared request and return the body text, with the same status and
/// empty-body mapping as [`get_text`].
pub(crate) async fn send_text(req: RequestBuilder, shown_url: String) -> Result<String, PulseError> {
    // reqwest errors print the full URL, which would carry the key.
    let resp = req.send().await.map_err(|e| PulseError::Transport(e.without_url()))?;

    let status = resp.status();
    if !status.is_success() {
        debug!(status = status.as_u16(), url = %shown_url, "unsuccessful response");
        return Err(PulseError::Status {
            status: status.as_u16(),
            url: shown_url,
        });
    }

    let text = resp
        .text()
        .await
        .map_err(|e| PulseError::Transport(e.without_url()))?;
    if text.trim().is_empty() {
        return Err(PulseError::EmptyResponse { url: shown_url });
    }
    Ok(text)
}
