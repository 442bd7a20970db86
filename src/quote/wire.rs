use serde::Deserialize;

use crate::core::wire::AvNotice;

#[derive(Deserialize)]
pub(crate) struct GlobalQuoteEnvelope {
    #[serde(rename = "Global Quote")]
    pub(crate) global_quote: Option<GlobalQuoteNode>,
    #[serde(flatten)]
    pub(crate) notice: AvNotice,
}

// Alpha Vantage sends every field as a string, and an empty object for unknown symbols.
#[derive(Deserialize, Default)]
pub(crate) struct GlobalQuoteNode {
    #[serde(rename = "01. symbol")]
    pub(crate) symbol: Option<String>,
    #[serde(rename = "02. open")]
    pub(crate) open: Option<String>,
    #[serde(rename = "03. high")]
    pub(crate) high: Option<String>,
    #[serde(rename = "04. low")]
    pub(crate) low: Option<String>,
    #[serde(rename = "05. price")]
    pub(crate) price: Option<String>,
    #[serde(rename = "06. volume")]
    pub(crate) volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub(crate) latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub(crate) previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub(crate) change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub(crate) change_percent: Option<String>,
}

impl GlobalQuoteNode {
    pub(crate) const fn is_empty(&self) -> bool {
        self.symbol.is_none()
            && self.price.is_none()
            && self.open.is_none()
            && self.latest_trading_day.is_none()
    }
}
