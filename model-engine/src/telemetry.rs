//! Library-scoped tracing layer for the model engine.
//!
//! The binary installs its own global subscriber; this layer can be
//! composed on top to get compact, RFC 3339-stamped lines for engine
//! events only, without touching other crates' output.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, filter};

/// Target prefix of every event emitted by this crate.
pub const TARGET_PREFIX: &str = "model_engine";

/// RFC 3339 UTC timestamps via `chrono`, seconds precision.
#[derive(Clone, Copy, Debug, Default)]
struct Rfc3339Utc;

impl FormatTime for Rfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let s = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer that renders only this crate's events.
///
/// Compact single-line output, target shown, ANSI colors only on a TTY.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let only_this_crate = filter::filter_fn(|meta| meta.target().starts_with(TARGET_PREFIX));

    fmt::layer()
        .compact()
        .with_timer(Rfc3339Utc)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(only_this_crate)
}
