//! Logging setup
//!
//! `RUST_LOG` overrides the default filter. JSON output is meant for
//! production log collectors, plain text for development.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "refuel_server=info,tower_http=info";

pub fn init_logger(json_format: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        subscriber.with(fmt::layer().with_target(true)).init();
    }
}
