//! Quote data model.
//!
//! A `Quote` is the unit of content shown to the user: a short text and the
//! author it is attributed to. Quotes are transient; a new one replaces the
//! previous on every refresh.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Short quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body, never empty.
    pub text: String,
    /// Attributed author, empty when unknown.
    pub author: String,
}

impl Quote {
    /// Build a quote from raw service fields.
    ///
    /// Both fields are trimmed. Returns `QuoteError::Malformed` when the text is
    /// empty after trimming; an empty author is accepted.
    pub fn new(text: &str, author: &str) -> Result<Quote, QuoteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuoteError::Malformed("quote text is empty".to_string()));
        }
        Ok(Quote {
            text: text.to_string(),
            author: author.trim().to_string(),
        })
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.text)?;
        if !self.author.is_empty() {
            write!(f, " — {}", self.author)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let quote = Quote::new("  Stay curious. ", " Anon ").unwrap();
        assert_eq!(quote.text, "Stay curious.");
        assert_eq!(quote.author, "Anon");
    }

    #[test]
    fn test_new_rejects_blank_text() {
        assert!(matches!(Quote::new("   ", "Someone"), Err(QuoteError::Malformed(_))));
    }

    #[test]
    fn test_new_allows_empty_author() {
        let quote = Quote::new("Words.", "").unwrap();
        assert!(quote.author.is_empty());
        assert_eq!(quote.to_string(), "\"Words.\"");
    }

    #[test]
    fn test_display_with_author() {
        let quote = Quote::new("Words.", "Someone").unwrap();
        assert_eq!(quote.to_string(), "\"Words.\" — Someone");
    }
}
