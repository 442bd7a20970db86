use chrono::NaiveDate;

use crate::{
    core::{
        PulseClient, PulseError, net,
        wire::{parse_f64, parse_percent, parse_u64},
    },
    quote::{Quote, wire},
};

pub(super) async fn fetch_quote(client: &PulseClient, symbol: &str) -> Result<Quote, PulseError> {
    let key = client.market_api_key()?;
    let mut url = client.base_market().clone();
    url.query_pairs_mut()
        .append_pair("function", "GLOBAL_QUOTE")
        .append_pair("symbol", symbol)
        .append_pair("apikey", key);

    let shown = net::redact(client, &url);
    let body = net::get_text(client, url, "global_quote").await?;
    decode_quote(&body, symbol, shown)
}

pub(super) fn decode_quote(body: &str, symbol: &str, shown_url: String) -> Result<Quote, PulseError> {
    let env: wire::GlobalQuoteEnvelope = serde_json::from_str(body)?;

    let Some(node) = env.global_quote else {
        return Err(env.notice.into_error("Global Quote"));
    };
    env.notice.log(symbol);
    if node.is_empty() {
        return Err(PulseError::EmptyResponse { url: shown_url });
    }

    let field = |name: &str, v: Option<&String>| -> Result<f64, PulseError> {
        v.and_then(|s| parse_f64(s))
            .ok_or_else(|| PulseError::Decode(format!("{symbol}: bad or missing {name}")))
    };

    Ok(Quote {
        symbol: node.symbol.clone().unwrap_or_else(|| symbol.to_string()),
        price: field("price", node.price.as_ref())?,
        change: field("change", node.change.as_ref())?,
        change_percent: node
            .change_percent
            .as_deref()
            .and_then(parse_percent)
            .ok_or_else(|| PulseError::Decode(format!("{symbol}: bad or missing change percent")))?,
        open: field("open", node.open.as_ref())?,
        high: field("high", node.high.as_ref())?,
        low: field("low", node.low.as_ref())?,
        volume: node
            .volume
            .as_deref()
            .and_then(parse_u64)
            .ok_or_else(|| PulseError::Decode(format!("{symbol}: bad or missing volume")))?,
        latest_trading_day: node
            .latest_trading_day
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| {
                PulseError::Decode(format!("{symbol}: bad or missing latest trading day"))
            })?,
        previous_close: node.previous_close.as_deref().and_then(parse_f64),
    })
}
