use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// A span that shows a spinner with `msg` while it is entered.
pub fn spinner_span(msg: &str) -> Span {
    let span: Span = info_span!("task", indicatif.pb_show = true);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        span.pb_set_style(&style.tick_strings(TICKS));
    }
    span.pb_set_message(msg);
    span
}

/// A span that shows a progress bar over `len` steps.
pub fn progress_span(msg: &str, len: u64) -> Span {
    let span: Span = info_span!("progress", indicatif.pb_show = true);
    if let Ok(style) =
        ProgressStyle::with_template("{msg} [{bar:32.cyan/blue}] {pos}/{len} ({eta})")
    {
        span.pb_set_style(&style.progress_chars("█▓░"));
    }
    span.pb_set_length(len);
    span.pb_set_message(msg);
    span
}

pub fn set_progress(span: &Span, position: usize) {
    span.pb_set_position(position as u64);
}
