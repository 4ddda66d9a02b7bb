use std::time::Duration;

use colored::*;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};
use netdiag_common::{
    config::Config,
    models::{PingSummary, ProbeResult},
    sink::{DiagnosticSink, Severity, record_outcome},
    success, warn,
};
use netdiag_core::Prober;

const INTERVAL: Duration = Duration::from_secs(1);

pub async fn ping(
    host: &str,
    count: u32,
    limit: Duration,
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    print::header(&format!("pinging {host}"), cfg.quiet);
    if !is_root::is_root() {
        tracing::debug!("not running as root, using datagram ICMP sockets");
    }

    let quiet: u8 = cfg.quiet;
    let prober = Prober::default().with_progress(Box::new(move |seq, result| {
        print_reply(seq, result, quiet);
    }));
    let span = spinner::spinner_span(&format!("waiting for {host}"));
    let summary: PingSummary = prober
        .ping(host, count as usize, limit, INTERVAL)
        .instrument(span)
        .await;

    print_summary(&summary, cfg);

    let level = match summary.received {
        0 => Severity::Warning,
        _ => Severity::Info,
    };
    record_outcome(sink, level, &summary_line(&summary));
    Ok(())
}

fn print_reply(seq: usize, result: &ProbeResult, quiet: u8) {
    if quiet > 1 {
        return;
    }
    let seq: ColoredString = format!("#{seq}").color(colors::ACCENT);
    let line: String = match (result.success, result.latency, result.error) {
        (true, Some(rtt), _) => format!("{} reply in {}", seq, format::latency(rtt).green()),
        (_, _, Some(kind)) => format!("{} no reply ({kind})", seq).color(colors::BAD).to_string(),
        _ => format!("{} no reply", seq).color(colors::BAD).to_string(),
    };
    print::status(line);
}

fn print_summary(summary: &PingSummary, cfg: &Config) {
    if cfg.quiet > 1 {
        print::print(&summary_line(summary));
        return;
    }

    print::header("statistics", cfg.quiet);
    let fields = print::Fields::new(&["Sent", "Received", "Loss", "RTT"]);
    fields.line("Sent", summary.sent);
    fields.line("Received", summary.received);
    fields.line("Loss", format!("{:.1}%", summary.loss_percent()));
    if let (Some(min), Some(avg), Some(max)) = (summary.min, summary.avg, summary.max) {
        fields.line(
            "RTT",
            format!(
                "min {} / avg {} / max {}",
                format::latency(min),
                format::latency(avg),
                format::latency(max)
            ),
        );
    }

    match summary.received {
        0 => warn!("{} is unreachable", summary.target),
        _ => success!("{} is reachable", summary.target),
    }
}

fn summary_line(summary: &PingSummary) -> String {
    let rtt: String = match summary.avg {
        Some(avg) => format!(", avg {}", format::latency(avg)),
        None => String::new(),
    };
    format!(
        "ping {}: {}/{} replies, {:.1}% loss{}",
        summary.target,
        summary.received,
        summary.sent,
        summary.loss_percent(),
        rtt
    )
}
