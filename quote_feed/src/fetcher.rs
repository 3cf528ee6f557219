//! HTTP transport for quote requests.
//!
//! `Fetcher` is the seam between the provider and the network: it returns the
//! raw body of a GET request or the reason it failed. `HttpFetcher` is the real
//! implementation on top of a blocking `ureq::Agent`.
use std::time::Duration;

use log::debug;
use quote_common::QuoteError;
use quote_common::Result;
use quote_common::net::{ACCEPT_JSON, DEFAULT_ORIGIN};

/// Performs one bounded GET request.
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// Must give up after `timeout`. A non-success status is an error.
    fn get(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Blocking HTTP client sending `Accept` and `Origin` headers.
pub struct HttpFetcher {
    agent: ureq::Agent,
    origin: String,
}

impl HttpFetcher {
    /// Client that announces itself as coming from `origin`.
    pub fn new(origin: &str) -> Self {
        HttpFetcher {
            agent: ureq::AgentBuilder::new().build(),
            origin: origin.to_string(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        debug!("GET {} (timeout {} ms)", url, timeout.as_millis());
        let response = self
            .agent
            .get(url)
            .set("Accept", ACCEPT_JSON)
            .set("Origin", &self.origin)
            .timeout(timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => QuoteError::Status(code),
                ureq::Error::Transport(transport) => QuoteError::Network(transport.to_string()),
            })?;
        let body = response.into_string()?;
        Ok(body)
    }
}
