//! Remote quote services and their response mappers.
//!
//! Every service answers with its own JSON shape, so each `EndpointSpec` carries
//! the mapper for that shape next to its URL. The default list is ordered by
//! priority and is tried front to back by the provider.
use clap::ValueEnum;
use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::error::QuoteError;
use crate::quote::Quote;
use crate::result::Result;

/// Maps a raw response body to a quote.
pub type Mapper = fn(&str) -> Result<Quote>;

/// Known quote services.
#[derive(Debug, Clone, Copy, ValueEnum, Display, EnumString, Hash, Eq, PartialEq)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Source {
    /// `{ "content": .., "author": .. }`
    Quotable,
    /// `[{ "q": .., "a": .. }]`
    ZenQuotes,
    /// `{ "quote": .., "author": .. }`
    DummyJson,
}

impl Source {
    /// Public URL returning one random quote.
    pub fn url(&self) -> &'static str {
        match self {
            Source::Quotable => "https://api.quotable.io/random",
            Source::ZenQuotes => "https://zenquotes.io/api/random",
            Source::DummyJson => "https://dummyjson.com/quotes/random",
        }
    }

    /// Response mapper for this service's payload shape.
    pub fn mapper(&self) -> Mapper {
        match self {
            Source::Quotable => map_quotable,
            Source::ZenQuotes => map_zenquotes,
            Source::DummyJson => map_dummyjson,
        }
    }
}

/// One entry of the fallback chain.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// Which service this is, for logging and reporting.
    pub source: Source,
    /// Full request URL.
    pub url: String,
    /// Turns the response body into a quote.
    pub mapper: Mapper,
}

impl EndpointSpec {
    /// Endpoint for `source` at its public URL.
    pub fn new(source: Source) -> Self {
        Self::with_url(source, source.url())
    }

    /// Endpoint for `source` served from a different URL (mirrors, tests).
    pub fn with_url(source: Source, url: &str) -> Self {
        EndpointSpec {
            source,
            url: url.to_string(),
            mapper: source.mapper(),
        }
    }

    /// The fixed priority order: Quotable, ZenQuotes, DummyJSON.
    pub fn defaults() -> Vec<EndpointSpec> {
        vec![
            EndpointSpec::new(Source::Quotable),
            EndpointSpec::new(Source::ZenQuotes),
            EndpointSpec::new(Source::DummyJson),
        ]
    }

    /// Apply this endpoint's mapper to a response body.
    pub fn map(&self, body: &str) -> Result<Quote> {
        (self.mapper)(body)
    }
}

#[derive(Deserialize)]
struct QuotablePayload {
    content: String,
    #[serde(default)]
    author: String,
}

#[derive(Deserialize)]
struct ZenQuotesEntry {
    q: String,
    #[serde(default)]
    a: String,
}

#[derive(Deserialize)]
struct DummyJsonPayload {
    quote: String,
    #[serde(default)]
    author: String,
}

fn parse<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| QuoteError::Malformed(e.to_string()))
}

fn map_quotable(body: &str) -> Result<Quote> {
    let payload: QuotablePayload = parse(body)?;
    Quote::new(&payload.content, &payload.author)
}

fn map_zenquotes(body: &str) -> Result<Quote> {
    let entries: Vec<ZenQuotesEntry> = parse(body)?;
    let first = entries
        .first()
        .ok_or_else(|| QuoteError::Malformed("empty quote array".to_string()))?;
    Quote::new(&first.q, &first.a)
}

fn map_dummyjson(body: &str) -> Result<Quote> {
    let payload: DummyJsonPayload = parse(body)?;
    Quote::new(&payload.quote, &payload.author)
}
