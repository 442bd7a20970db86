use serde::Deserialize;
use std::collections::HashMap;

use crate::core::wire::AvNotice;

#[derive(Deserialize)]
pub(crate) struct DailyEnvelope {
    #[serde(rename = "Meta Data")]
    pub(crate) meta: Option<MetaNode>,
    #[serde(rename = "Time Series (Daily)")]
    pub(crate) series: Option<HashMap<String, DailyNode>>,
    #[serde(flatten)]
    pub(crate) notice: AvNotice,
}

#[derive(Deserialize)]
pub(crate) struct MetaNode {
    #[serde(rename = "2. Symbol")]
    pub(crate) symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    pub(crate) last_refreshed: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct DailyNode {
    #[serde(rename = "1. open")]
    pub(crate) open: Option<String>,
    #[serde(rename = "2. high")]
    pub(crate) high: Option<String>,
    #[serde(rename = "3. low")]
    pub(crate) low: Option<String>,
    #[serde(rename = "4. close")]
    pub(crate) close: Option<String>,
    #[serde(rename = "5. volume")]
    pub(crate) volume: Option<String>,
}
