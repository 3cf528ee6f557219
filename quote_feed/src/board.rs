//! Display gate for fetch results.
//!
//! A manual refresh and a timer tick can be in flight at the same time and both
//! target the same display. Every fetch cycle takes a `Ticket` carrying a
//! monotonically increasing sequence number; only the result holding the most
//! recently issued ticket is applied, older ones are dropped.
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use quote_common::Quote;

use crate::fetcher::Fetcher;
use crate::provider::{Fetched, Origin, QuoteProvider};

/// Notice shown when the quote came from the static list.
pub const FALLBACK_NOTICE: &str = "Unable to fetch a fresh quote, using fallback";

/// Where quotes end up. Rendering is entirely up to the implementor.
pub trait QuoteDisplay: Send + Sync {
    /// Loading indicator on/off.
    fn set_busy(&self, busy: bool);
    /// Replace the displayed quote.
    fn show_quote(&self, quote: &Quote);
    /// Show a transient notice.
    fn notify(&self, message: &str);
}

/// Sequence number of one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    /// Position of this request in issue order, starting at 1.
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Applies fetch results to a display, newest request only.
pub struct QuoteBoard<D> {
    display: D,
    issued: AtomicU64,
    apply: Mutex<()>,
}

impl<D: QuoteDisplay> QuoteBoard<D> {
    /// Board writing to `display`; no ticket issued yet.
    pub fn new(display: D) -> Self {
        QuoteBoard {
            display,
            issued: AtomicU64::new(0),
            apply: Mutex::new(()),
        }
    }

    /// Issue a new ticket and mark the display busy.
    pub fn begin(&self) -> Ticket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.display.set_busy(true);
        Ticket(seq)
    }

    /// Apply `fetched` if `ticket` is still the newest one.
    ///
    /// Returns `false` when the result was stale and discarded.
    pub fn finish(&self, ticket: Ticket, fetched: &Fetched) -> bool {
        let _guard = self.apply.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.0 != latest {
            debug!("Discarding stale quote #{} (latest is #{})", ticket.0, latest);
            return false;
        }
        self.display.show_quote(&fetched.quote);
        if fetched.origin == Origin::Fallback {
            self.display.notify(FALLBACK_NOTICE);
        }
        self.display.set_busy(false);
        true
    }

    /// The wrapped display.
    pub fn display(&self) -> &D {
        &self.display
    }
}

/// One full refresh: take a ticket, fetch, apply.
pub fn run_cycle<F: Fetcher, D: QuoteDisplay>(
    provider: &QuoteProvider<F>,
    board: &QuoteBoard<D>,
) -> Origin {
    let ticket = board.begin();
    let fetched = provider.fetch();
    board.finish(ticket, &fetched);
    fetched.origin
}
