use chrono::NaiveDate;
use tracing::debug;

use crate::{
    core::{
        PulseClient, PulseError, net,
        wire::{parse_f64, parse_u64},
    },
    history::{DailySeries, LatestDay, PricePoint, SeriesMeta, wire},
};

pub(super) async fn fetch_daily(client: &PulseClient, symbol: &str) -> Result<DailySeries, PulseError> {
    let key = client.market_api_key()?;
    let mut url = client.base_market().clone();
    url.query_pairs_mut()
        .append_pair("function", "TIME_SERIES_DAILY")
        .append_pair("symbol", symbol)
        .append_pair("outputsize", "compact")
        .append_pair("apikey", key);

    let body = net::get_text(client, url, "time_series_daily").await?;
    decode_daily(&body, symbol)
}

pub(super) fn decode_daily(body: &str, symbol: &str) -> Result<DailySeries, PulseError> {
    let env: wire::DailyEnvelope = serde_json::from_str(body)?;

    let (Some(meta), Some(series)) = (env.meta, env.series) else {
        return Err(env.notice.into_error("Meta Data or Time Series (Daily)"));
    };
    env.notice.log(symbol);
    let total = series.len();

    let mut days: Vec<(NaiveDate, f64, wire::DailyNode)> = series
        .into_iter()
        .filter_map(|(key, node)| {
            let Ok(date) = NaiveDate::parse_from_str(&key, "%Y-%m-%d") else {
                debug!(symbol, key = %key, "dropping entry with unparseable date");
                return None;
            };
            let Some(close) = node.close.as_deref().and_then(parse_f64) else {
                debug!(symbol, %date, "dropping entry with unparseable close");
                return None;
            };
            Some((date, close, node))
        })
        .collect();

    days.sort_by(|a, b| b.0.cmp(&a.0));

    let latest = days
        .first()
        .map(|(_, close, node)| LatestDay {
            open: node.open.as_deref().and_then(parse_f64),
            high: node.high.as_deref().and_then(parse_f64),
            low: node.low.as_deref().and_then(parse_f64),
            close: Some(*close),
            volume: node.volume.as_deref().and_then(parse_u64),
        })
        .unwrap_or_default();

    let points: Vec<PricePoint> = days
        .into_iter()
        .map(|(date, close, _)| PricePoint { date, close })
        .collect();
    debug!(symbol, kept = points.len(), total, "decoded daily series");

    Ok(DailySeries {
        meta: SeriesMeta {
            symbol: meta.symbol.unwrap_or_else(|| symbol.to_string()),
            last_refreshed: meta.last_refreshed,
        },
        points,
        latest,
    })
}
