//! Logging for the classify client: a fmt layer that only renders this
//! library's events, and an `EnvFilter` raising this library's level.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

const TARGET_PREFIX: &str = "visual_recognition";

/// `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// True for `visual_recognition` and its submodules, but not for crates that
/// merely share the prefix (`visual_recognition_client`).
pub fn is_library_target(target: &str) -> bool {
    target == TARGET_PREFIX
        || target
            .strip_prefix(TARGET_PREFIX)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Compact layer for option building and form encoding events.
///
/// Closing spans are logged, so `ClassifyForm::from_options` reports how long
/// draining the image stream took. Colors only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_this_crate = filter::filter_fn(|meta| is_library_target(meta.target()));

    fmt::layer()
        .with_timer(UtcSeconds)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_this_crate)
}

/// `visual_recognition=<level>`.
fn level_directive(level: Level) -> Result<Directive, ParseError> {
    format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase()).parse()
}

/// Filter from `RUST_LOG` (or `default`), with `level` applied to this library.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match level_directive(level) {
        Ok(directive) => base.add_directive(directive),
        Err(_) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_matching_respects_module_boundary() {
        assert!(is_library_target("visual_recognition"));
        assert!(is_library_target("visual_recognition::request::classify_form"));
        assert!(!is_library_target("visual_recognition_client"));
        assert!(!is_library_target("reqwest::connect"));
    }

    #[test]
    fn level_directive_names_this_crate() {
        let d = level_directive(Level::DEBUG).unwrap();
        assert_eq!(d.to_string(), "visual_recognition=debug");
    }
}
