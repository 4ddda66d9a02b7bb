use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::{IndicatifLayer, filter::IndicatifFilter};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const PRINT_TARGET: &str = "netdiag::print";
const SUCCESS_TARGET: &str = "netdiag::success";

pub struct NetdiagFormatter;

impl<S, N> FormatEvent<S, N> for NetdiagFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
                match (*meta.level(), meta.target()) {
                    (Level::INFO, SUCCESS_TARGET) => ("[✔]", |s| s.green().bold()),
                    (Level::TRACE, _) => ("[ ]", |s| s.dimmed()),
                    (Level::DEBUG, _) => ("[?]", |s| s.blue()),
                    (Level::INFO, _) => ("[+]", |s| s.green().bold()),
                    (Level::WARN, _) => ("[*]", |s| s.yellow().bold()),
                    (Level::ERROR, _) => ("[-]", |s| s.red().bold()),
                };
            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` adds our own debug events.
/// Output goes through the indicatif layer so log lines never tear progress bars.
pub fn init_logging(verbose: bool) {
    let default_level: &str = if verbose { "info,netdiag=debug" } else { "info" };
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let indicatif_layer = IndicatifLayer::new();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .event_format(NetdiagFormatter)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .try_init();
}
