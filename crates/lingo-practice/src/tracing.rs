//! Tracing and logging setup for processes that drive the scheduler
//!
//! Development gets human-readable output, production gets JSON lines for log
//! aggregation. `RUST_LOG` overrides the default filter in both cases.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter directives when `RUST_LOG` is unset.
///
/// Our own crates log one level more verbosely than dependencies, so
/// reconciliation warnings and grading decisions show up without the noise.
pub const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "info,lingo_practice=debug,lingo_replay=debug",
        Environment::Production => "warn,lingo_practice=info,lingo_replay=info",
    }
}

fn env_filter(env: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)))
}

/// Install the global subscriber for `env`.
///
/// # Development Mode
/// - Pretty-printed output with file and line numbers
/// - `debug` for Lingo crates, `info` for everything else
///
/// # Production Mode
/// - JSON lines with the event fields flattened (`user_id`, `item_id`, ...)
/// - `info` for Lingo crates, `warn` for everything else
pub fn init_tracing(env: &Environment) {
    let layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .with_filter(env_filter(env))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_target(true)
            .with_filter(env_filter(env))
            .boxed()
    };

    tracing_subscriber::registry().with(layer).init();

    tracing::debug!(environment = ?env, "Tracing initialized");
}
