//! Terminal rendering of quotes and transient notices.
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, never, select, unbounded};
use log::{debug, info, warn};
use quote_common::Quote;
use quote_feed::QuoteDisplay;

/// A notice that hides itself after a timeout.
///
/// A new notice replaces the visible one and restarts the timeout.
pub struct Toast {
    tx: Sender<String>,
    visible: Arc<Mutex<Option<String>>>,
}

impl Toast {
    /// Start the dismissal thread; notices stay visible for `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let (tx, rx) = unbounded::<String>();
        let visible = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&visible);
        thread::spawn(move || run_toast(rx, shared, timeout));
        Toast { tx, visible }
    }

    /// Display `message`, replacing any visible notice.
    pub fn show(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            warn!("Notice dropped: {}", message);
        }
    }

    /// Notice currently on screen, if any.
    pub fn visible(&self) -> Option<String> {
        self.visible
            .lock()
            .map(|current| current.clone())
            .unwrap_or_default()
    }
}

fn run_toast(rx: Receiver<String>, visible: Arc<Mutex<Option<String>>>, timeout: Duration) {
    let mut expiry: Option<Receiver<Instant>> = None;
    loop {
        let hide = expiry.clone().unwrap_or_else(never);
        select! {
            recv(rx) -> msg => match msg {
                Ok(message) => {
                    warn!("{}", message);
                    if let Ok(mut current) = visible.lock() {
                        *current = Some(message);
                    }
                    expiry = Some(crossbeam_channel::after(timeout));
                }
                Err(_) => break,
            },
            recv(hide) -> _ => {
                if let Ok(mut current) = visible.lock() {
                    *current = None;
                }
                expiry = None;
                debug!("Notice dismissed");
            }
        }
    }
}

/// Prints quotes through the logger and notices through a `Toast`.
pub struct ConsoleDisplay {
    toast: Toast,
}

impl ConsoleDisplay {
    /// Console display whose notices hide after `toast_timeout`.
    pub fn new(toast_timeout: Duration) -> Self {
        ConsoleDisplay {
            toast: Toast::new(toast_timeout),
        }
    }
}

impl QuoteDisplay for ConsoleDisplay {
    fn set_busy(&self, busy: bool) {
        if busy {
            info!("Loading…");
        }
    }

    fn show_quote(&self, quote: &Quote) {
        info!("QUOTE: {}", quote);
    }

    fn notify(&self, message: &str) {
        self.toast.show(message);
    }
}
