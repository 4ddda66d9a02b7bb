use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::terminal::{format, network_fmt, print, spinner};
use netdiag_common::{
    config::Config,
    models::TracerouteHop,
    sink::{DiagnosticSink, Severity, record_outcome},
    success, warn,
};
use netdiag_core::TracerouteEngine;

pub async fn trace(
    host: &str,
    max_hops: u8,
    per_hop_timeout: Duration,
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    if !is_root::is_root() {
        warn!("not running as root: intermediate routers will likely show as '*'");
    }

    print::header(&format!("route to {host}"), cfg.quiet);

    let start_time: Instant = Instant::now();
    let span = spinner::spinner_span(&format!("tracing {host}, up to {max_hops} hops"));
    let hops: Vec<TracerouteHop> = TracerouteEngine::default()
        .traceroute(host, max_hops, per_hop_timeout)
        .instrument(span)
        .await?;

    for hop in &hops {
        print::print(&network_fmt::hop_line(hop));
        record_outcome(sink, hop_severity(hop), &hop_record(host, hop));
    }

    let reached: bool = hops.last().is_some_and(|hop| hop.reached_destination);
    let summary: String = format!(
        "{} hops in {}",
        hops.len(),
        format::elapsed(start_time.elapsed())
    );
    match reached {
        true => success!("reached {host}: {summary}"),
        false => warn!("did not reach {host}: {summary}"),
    }
    print::closing_rule(cfg.quiet);
    Ok(())
}

fn hop_severity(hop: &TracerouteHop) -> Severity {
    match hop.is_error() {
        true => Severity::Error,
        false => Severity::Info,
    }
}

fn hop_record(host: &str, hop: &TracerouteHop) -> String {
    let address: String = hop
        .address
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| String::from("*"));
    let rtt: String = hop.rtt.map(format::latency).unwrap_or_default();
    format!("trace {host}: hop {} {} {} {:?}", hop.ttl, address, rtt, hop.status)
}
