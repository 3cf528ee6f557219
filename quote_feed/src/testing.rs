//! Stub fetcher and display shared by the unit tests.
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use quote_common::{Quote, QuoteError, Result};

use crate::board::QuoteDisplay;
use crate::fetcher::Fetcher;

pub(crate) const QUOTABLE_BODY: &str =
    r#"{"_id":"a1","content":"Act as if what you do makes a difference.","author":"William James"}"#;
pub(crate) const ZENQUOTES_BODY: &str =
    r#"[{"q":"Simplicity is the ultimate sophistication.","a":"Leonardo da Vinci"}]"#;
pub(crate) const DUMMYJSON_BODY: &str =
    r#"{"id":7,"quote":"Well begun is half done.","author":"Aristotle"}"#;

/// Canned answer for one URL.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Body(&'static str),
    Status(u16),
    Down,
    /// Sleep, then fail as a network error.
    Slow(Duration),
}

/// Answers from a URL table; unknown URLs are unreachable.
pub(crate) struct ScriptedFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        ScriptedFetcher {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// URLs requested so far with the timeout each was given.
    pub(crate) fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        self.calls.lock().unwrap().push((url.to_string(), timeout));
        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(body.to_string()),
            Some(Reply::Status(code)) => Err(QuoteError::Status(*code)),
            Some(Reply::Slow(delay)) => {
                thread::sleep(*delay);
                Err(QuoteError::Network("timed out".to_string()))
            }
            Some(Reply::Down) | None => Err(QuoteError::Network("connection refused".to_string())),
        }
    }
}

/// Records everything pushed to it.
#[derive(Default)]
pub(crate) struct RecordingDisplay {
    pub(crate) shown: Mutex<Vec<Quote>>,
    pub(crate) notices: Mutex<Vec<String>>,
    pub(crate) busy: Mutex<Vec<bool>>,
}

impl RecordingDisplay {
    pub(crate) fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl QuoteDisplay for RecordingDisplay {
    fn set_busy(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }

    fn show_quote(&self, quote: &Quote) {
        self.shown.lock().unwrap().push(quote.clone());
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}
