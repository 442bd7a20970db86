//! Search suggestions derived from article text.

use std::collections::BTreeSet;

/// A deduplicated, sorted set of lowercase search tokens.
///
/// The index is a pure function of its corpus: it is rebuilt wholesale on every feed
/// refresh, so tokens from articles that disappeared go with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionIndex {
    tokens: BTreeSet<String>,
}

impl SuggestionIndex {
    /// Build an index from a corpus of free-text strings.
    ///
    /// Each string is split on every non-alphanumeric character, empty pieces are
    /// discarded and the rest lowercased.
    ///
    /// ```
    /// use market_pulse::SuggestionIndex;
    ///
    /// let idx = SuggestionIndex::rebuild(["Oil prices jump", "OIL-linked stocks"]);
    /// let tokens: Vec<_> = idx.tokens().collect();
    /// assert_eq!(tokens, ["jump", "linked", "oil", "prices", "stocks"]);
    /// ```
    pub fn rebuild<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = corpus
            .into_iter()
            .flat_map(|text| {
                text.as_ref()
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|t| !t.is_empty())
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { tokens }
    }

    /// At most `limit` tokens starting with `prefix` (case-folded), in ascending order.
    ///
    /// An empty prefix yields nothing: suggestions only show once the user types.
    #[must_use]
    pub fn suggestions_for(&self, prefix: &str, limit: usize) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.tokens
            .range(prefix.clone()..)
            .take_while(|t| t.starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect()
    }

    /// All tokens, ascending.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
