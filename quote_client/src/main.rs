//! Quote Client — shows inspirational quotes in the terminal and keeps them
//! fresh. Quotes come from a chain of public quote services tried in order; when
//! all of them fail, a built-in quote is shown and the services are retried
//! sooner than usual.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client rotate --interval-ms 15000 --jitter-ms 3000
//! quote_client once --json --skip quotable
//! quote_client contact --name Ada --email ada@example.com --message "Hello"
//! ```
//!
//! While rotating, stdin accepts `n` (next), `p` (pause), `r` (resume),
//! `s` (stop), `g` (start) and `q` (quit).
#![warn(missing_docs)]
mod args;
mod console;
mod input;

use crate::args::{Args, Command, FetchArgs, rotation_config};
use crate::console::ConsoleDisplay;
use crate::input::{HELP, Input, forward_lines};
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{info, warn};
use quote_common::QuoteError;
use quote_common::Result;
use quote_common::contact::{ContactForm, Subscription, THANKS};
use quote_common::net::TOAST_TIMEOUT_MS;
use quote_feed::board::FALLBACK_NOTICE;
use quote_feed::{AutoRotator, HttpFetcher, Origin, QuoteBoard, QuoteProvider, RotationConfig};
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn build_provider(fetch: &FetchArgs) -> QuoteProvider<HttpFetcher> {
    QuoteProvider::new(HttpFetcher::new(&fetch.origin))
        .with_endpoints(fetch.endpoints())
        .with_timeout(fetch.timeout())
}

/// Fetch one quote and print it to stdout.
fn run_once(fetch: &FetchArgs, json: bool) -> Result<(), QuoteError> {
    let fetched = build_provider(fetch).fetch();
    if fetched.origin == Origin::Fallback {
        warn!("{}", FALLBACK_NOTICE);
    }
    if json {
        println!("{}", serde_json::to_string(&fetched.quote)?);
    } else {
        println!("{}", fetched.quote);
    }
    Ok(())
}

/// Rotate quotes until Ctrl+C or `q`.
fn run_rotate(fetch: &FetchArgs, config: RotationConfig) -> Result<(), QuoteError> {
    let provider = Arc::new(build_provider(fetch));
    let display = ConsoleDisplay::new(Duration::from_millis(TOAST_TIMEOUT_MS));
    let board = Arc::new(QuoteBoard::new(display));
    let mut rotator = AutoRotator::new(provider, board);

    let (input_tx, input_rx) = unbounded::<Input>();
    {
        let input_tx = input_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            let _ = input_tx.send(Input::Quit);
        })
        .map_err(|e| QuoteError::Io(io::Error::other(e.to_string())))?;
    }
    thread::spawn(move || forward_lines(io::stdin().lock(), input_tx));

    let _ = rotator.refresh_now();
    rotator.start(config);
    info!("Client is running. Press Ctrl+C to exit.");
    println!("{}", HELP);

    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Next => {
                let _ = rotator.refresh_now();
            }
            Input::Pause => rotator.pause_for_interaction(),
            Input::Resume => rotator.resume_after_interaction(),
            Input::Stop => rotator.stop(),
            Input::Start => {
                let config = rotator.config();
                rotator.start(config);
            }
            Input::Quit => break,
        }
    }

    rotator.stop();
    info!("Rotation loop stopping...");
    Ok(())
}

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    match args.command {
        Command::Rotate {
            fetch,
            interval_ms,
            jitter_ms,
            retry_ms,
        } => run_rotate(&fetch, rotation_config(interval_ms, jitter_ms, retry_ms)),
        Command::Once { fetch, json } => run_once(&fetch, json),
        Command::Contact {
            name,
            email,
            message,
        } => {
            let form = ContactForm { name, email, message }.validate()?;
            info!("Contact form from {} <{}> accepted", form.name, form.email);
            println!("{}", THANKS);
            Ok(())
        }
        Command::Subscribe { email } => {
            let subscription = Subscription { email }.validate()?;
            println!("Subscribed {}", subscription.email);
            Ok(())
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
