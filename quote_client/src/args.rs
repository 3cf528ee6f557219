//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::time::Duration;

use clap::{Parser, Subcommand};
use quote_common::net::{DEFAULT_ORIGIN, FETCH_TIMEOUT_MS, RETRY_INTERVAL_MS, ROTATE_INTERVAL_MS};
use quote_common::{EndpointSpec, Source};
use quote_feed::RotationConfig;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a quote now and keep rotating it until Ctrl+C.
    Rotate {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Base period between refreshes, in milliseconds.
        #[clap(long, default_value_t = ROTATE_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: u64,

        /// Random extra delay added to each period, up to this many milliseconds.
        #[clap(long, default_value_t = 0)]
        jitter_ms: u64,

        /// Delay before the next refresh after every service failed.
        #[clap(long, default_value_t = RETRY_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
        retry_ms: u64,
    },
    /// Fetch a single quote and print it.
    Once {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Print the quote as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Validate a contact form submission.
    Contact {
        /// Sender's name.
        #[clap(long)]
        name: String,
        /// Reply address.
        #[clap(long)]
        email: String,
        /// Message body.
        #[clap(long)]
        message: String,
    },
    /// Validate a newsletter sign-up.
    Subscribe {
        /// Address to subscribe.
        #[clap(long)]
        email: String,
    },
}

/// Options shared by every command that fetches quotes.
#[derive(Debug, clap::Args)]
pub struct FetchArgs {
    /// Budget for one fetch across all services, in milliseconds.
    #[clap(long, default_value_t = FETCH_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Origin header sent with quote requests.
    #[clap(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Leave a service out of the chain (repeatable).
    #[clap(long, value_enum)]
    pub skip: Vec<Source>,

    /// Do not touch the network; always use the built-in quotes.
    #[clap(long)]
    pub offline: bool,
}

impl FetchArgs {
    /// Endpoint chain after `--skip` and `--offline`.
    pub fn endpoints(&self) -> Vec<EndpointSpec> {
        if self.offline {
            return Vec::new();
        }
        EndpointSpec::defaults()
            .into_iter()
            .filter(|endpoint| !self.skip.contains(&endpoint.source))
            .collect()
    }

    /// Fetch budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Rotation timing from the `rotate` flags.
pub fn rotation_config(interval_ms: u64, jitter_ms: u64, retry_ms: u64) -> RotationConfig {
    RotationConfig {
        base: Duration::from_millis(interval_ms),
        jitter: Duration::from_millis(jitter_ms),
        retry: Duration::from_millis(retry_ms),
    }
}
