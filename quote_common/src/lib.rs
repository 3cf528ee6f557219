//!
//! Common types and utilities shared by the quote feed and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` value shown to users.
//! - `endpoints` — remote quote services paired with their response mappers.
//! - `fallback` — static quotes used when every service fails.
//! - `contact` — contact and newsletter form validation.
//! - `net` — networking and timing defaults.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod quote;
pub mod endpoints;
pub mod fallback;
pub mod contact;
pub mod net;

pub use error::QuoteError;
pub use result::Result;
pub use quote::Quote;
pub use endpoints::{EndpointSpec, Source};
pub use fallback::FallbackList;
