//! Static last-resort quotes used when every remote service fails.
use rand::seq::IndexedRandom;

use crate::error::QuoteError;
use crate::quote::Quote;

const DEFAULT_QUOTES: [(&str, &str); 3] = [
    (
        "Hope is being able to see that there is light despite all of the darkness.",
        "Desmond Tutu",
    ),
    (
        "You are braver than you believe, stronger than you seem, and smarter than you think.",
        "A.A. Milne",
    ),
    (
        "Once you choose hope, anything's possible.",
        "Christopher Reeve",
    ),
];

/// Non-empty list of quotes to pick from when offline.
#[derive(Debug, Clone)]
pub struct FallbackList {
    quotes: Vec<Quote>,
}

impl FallbackList {
    /// Wrap `quotes`, rejecting an empty list.
    pub fn new(quotes: Vec<Quote>) -> Result<Self, QuoteError> {
        if quotes.is_empty() {
            return Err(QuoteError::EmptyFallback);
        }
        Ok(Self { quotes })
    }

    /// Uniformly random member of the list.
    pub fn pick(&self) -> Quote {
        let mut rng = rand::rng();
        // The list is never empty, so `choose` always finds an entry.
        self.quotes
            .choose(&mut rng)
            .unwrap_or(&self.quotes[0])
            .clone()
    }

    /// All quotes in the list.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }
}

impl Default for FallbackList {
    fn default() -> Self {
        let quotes = DEFAULT_QUOTES
            .iter()
            .map(|(text, author)| Quote {
                text: text.to_string(),
                author: author.to_string(),
            })
            .collect();
        Self { quotes }
    }
}
