//! Logging integration for pagewarp.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-visit spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for a single navigation.
///
/// Enter this span around both animation phases of a visit so that every
/// log entry emitted while ranking and running carries the two URLs.
///
/// # Examples
///
/// ```
/// use pagewarp_core::logging::visit_span;
///
/// let span = visit_span("/blog/", "/blog/hello/");
/// let _guard = span.enter();
/// tracing::info!("animating");
/// ```
pub fn visit_span(from: &str, to: &str) -> tracing::Span {
    tracing::info_span!("visit", from = from, to = to)
}
