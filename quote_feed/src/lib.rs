//! Quote feed: fetching, display gating and auto-rotation.
//!
//! This crate wires together four building blocks:
//!
//! - `QuoteProvider` — walks the endpoint chain under one shared deadline and
//!   degrades to the static fallback list; a fetch never fails.
//! - `QuoteBoard` — hands results to a `QuoteDisplay`, dropping responses that
//!   were overtaken by a newer request.
//! - `AutoRotator` — one crossbeam timer thread refreshing the board on a
//!   jittered period, with a pause-on-interaction latch.
//! - `Fetcher` — the HTTP seam, implemented by `HttpFetcher` on `ureq`.
#![warn(missing_docs)]
pub mod board;
pub mod fetcher;
pub mod latch;
pub mod provider;
pub mod rotation;

#[cfg(test)]
mod testing;

pub use board::{QuoteBoard, QuoteDisplay, run_cycle};
pub use fetcher::{Fetcher, HttpFetcher};
pub use provider::{Fetched, Origin, QuoteProvider};
pub use rotation::{AutoRotator, RotationConfig};
