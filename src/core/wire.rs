use serde::Deserialize;
use tracing::warn;

use crate::core::PulseError;

/// Advisory fields Alpha Vantage places next to (or instead of) the payload.
///
/// Rate limiting and bad keys come back as HTTP 200 with one of these set.
#[derive(Deserialize, Default)]
pub(crate) struct AvNotice {
    #[serde(rename = "Error Message")]
    pub(crate) error_message: Option<String>,
    #[serde(rename = "Note")]
    pub(crate) note: Option<String>,
    #[serde(rename = "Information")]
    pub(crate) information: Option<String>,
}

impl AvNotice {
    /// Turn an upstream notice into an error when the payload is unusable.
    ///
    /// Only called when the expected payload object is missing, so any notice present
    /// is the best explanation we have.
    pub(crate) fn into_error(self, what: &str) -> PulseError {
        if let Some(msg) = self.error_message.or(self.note).or(self.information) {
            return PulseError::Api(msg);
        }
        PulseError::Decode(format!("missing {what}"))
    }

    /// Log notices that came along with a usable payload.
    pub(crate) fn log(&self, symbol: &str) {
        if let Some(msg) = self.note.as_deref().or(self.information.as_deref()) {
            warn!(symbol, "market data notice: {msg}");
        }
    }
}

/// Parse a string-encoded float (`"101.2500"`).
pub(crate) fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a string-encoded integer count (`"5123400"`).
pub(crate) fn parse_u64(s: &str) -> Option<u64> {
    s.trim().parse::<u64>().ok()
}

/// Parse a string-encoded percentage (`"-0.4321%"`) into its numeric value (`-0.4321`).
pub(crate) fn parse_percent(s: &str) -> Option<f64> {
    parse_f64(s.trim().trim_end_matches('%'))
}
