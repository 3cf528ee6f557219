//! Quote provider with ordered endpoint fallback.
//!
//! `QuoteProvider::fetch` walks the endpoint list in priority order under one
//! shared deadline and returns the first quote a service yields. Failures at a
//! single endpoint are logged and recorded but never abort the sequence; when no
//! endpoint succeeds, a quote is drawn from the static `FallbackList`. From the
//! caller's point of view a fetch always produces a quote.
//!
//! The provider holds no mutable state, so one instance can be shared between
//! the rotation timer and manual refreshes.
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{info, warn};
use quote_common::net::FETCH_TIMEOUT_MS;
use quote_common::{EndpointSpec, FallbackList, Quote, QuoteError, Source};

use crate::fetcher::Fetcher;

/// Where a fetched quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A remote service answered with a usable quote.
    Remote(Source),
    /// Every service failed; the quote is from the static list.
    Fallback,
}

/// Result of one fetch sequence.
#[derive(Debug)]
pub struct Fetched {
    /// The quote to show.
    pub quote: Quote,
    /// Which service produced it, or the fallback list.
    pub origin: Origin,
    /// Endpoints that failed before the quote was found, in the order tried.
    pub failures: Vec<(Source, QuoteError)>,
    /// UTC timestamp in milliseconds since Unix epoch.
    pub fetched_at_ms: u64,
}

/// Fetches quotes from a prioritized endpoint chain.
pub struct QuoteProvider<F> {
    fetcher: F,
    endpoints: Vec<EndpointSpec>,
    fallback: FallbackList,
    timeout: Duration,
}

impl<F: Fetcher> QuoteProvider<F> {
    /// Provider over the default endpoints, fallback list and 5 s budget.
    pub fn new(fetcher: F) -> Self {
        QuoteProvider {
            fetcher,
            endpoints: EndpointSpec::defaults(),
            fallback: FallbackList::default(),
            timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
        }
    }

    /// Replace the endpoint chain. An empty chain always answers from the fallback.
    pub fn with_endpoints(mut self, endpoints: Vec<EndpointSpec>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the static fallback quotes.
    pub fn with_fallback(mut self, fallback: FallbackList) -> Self {
        self.fallback = fallback;
        self
    }

    /// Budget shared by all attempts of one fetch.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoints in the order they are tried.
    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    /// Run one fetch sequence. Never fails.
    pub fn fetch(&self) -> Fetched {
        let deadline = Instant::now() + self.timeout;
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!("Skipping {}: fetch deadline exceeded", endpoint.source);
                failures.push((endpoint.source, QuoteError::Timeout));
                continue;
            }

            let attempt = self
                .fetcher
                .get(&endpoint.url, remaining)
                .and_then(|body| endpoint.map(&body));
            match attempt {
                Ok(quote) => {
                    info!("Quote fetched from {}", endpoint.source);
                    return Fetched {
                        quote,
                        origin: Origin::Remote(endpoint.source),
                        failures,
                        fetched_at_ms: now_ms(),
                    };
                }
                Err(e) => {
                    warn!("Quote fetch from {} failed: {}", endpoint.source, e);
                    failures.push((endpoint.source, e));
                }
            }
        }

        warn!(
            "No quote service answered ({} tried), using fallback",
            self.endpoints.len()
        );
        Fetched {
            quote: self.fallback.pick(),
            origin: Origin::Fallback,
            failures,
            fetched_at_ms: now_ms(),
        }
    }

    /// Convenience wrapper returning only the quote.
    pub fn fetch_quote(&self) -> Quote {
        self.fetch().quote
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}
