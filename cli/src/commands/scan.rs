use std::net::IpAddr;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, Span};

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};
use netdiag_common::{
    config::Config,
    models::{PortScanRequest, PortScanResult},
    network::ports::PortRange,
    sink::{DiagnosticSink, Severity, record_outcome},
    success,
};
use netdiag_core::{PortScanner, Resolver};

pub async fn scan(
    host: &str,
    ports: PortRange,
    concurrency: usize,
    connect_timeout: Duration,
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    PortScanRequest::check_limits(connect_timeout, concurrency)?;
    let target: IpAddr = Resolver::default().resolve_target(host).await?;
    let request = PortScanRequest::new(target, ports, connect_timeout, concurrency)?;

    print::header(&format!("scanning {host}"), cfg.quiet);

    let span: Span = spinner::progress_span(
        &format!("{target} ports {ports}"),
        request.port_count() as u64,
    );
    let progress: Span = span.clone();
    let scanner = PortScanner::default().with_progress(Box::new(move |settled| {
        spinner::set_progress(&progress, settled);
    }));

    let start_time: Instant = Instant::now();
    let result: PortScanResult = scanner.scan(&request).instrument(span).await;
    let total_time: Duration = start_time.elapsed();

    print_open_ports(&result, cfg);
    print_summary(host, &result, total_time, cfg);

    let open: String = result
        .open_ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(",");
    record_outcome(
        sink,
        Severity::Info,
        &format!(
            "scan {host} ({target}) ports {ports}: {} open [{open}] of {} attempted",
            result.open_ports.len(),
            result.attempted
        ),
    );
    Ok(())
}

fn print_open_ports(result: &PortScanResult, cfg: &Config) {
    if result.open_ports.is_empty() {
        print::no_results("no open ports", cfg.quiet);
        return;
    }

    for port in &result.open_ports {
        match cfg.quiet {
            2 => mprint!(&port.to_string()),
            _ => print::status(format!(
                "{}/tcp {}",
                port.to_string().color(colors::ACCENT),
                "open".color(colors::GOOD)
            )),
        }
    }
}

fn print_summary(host: &str, result: &PortScanResult, total_time: Duration, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let open_ports: ColoredString = format!("{} open ports", result.open_ports.len()).bold().green();
    let output: String = format!(
        "Scan of {host} complete: {open_ports} out of {} in {}",
        result.attempted,
        format::elapsed(total_time)
    );

    match cfg.quiet {
        0 => {
            print::closing_rule(cfg.quiet);
            print::centered(&output);
        }
        _ => success!("{}", output),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use netdiag_common::error::DiagError;
    use netdiag_common::sink::TracingSink;

    /// `.invalid` never resolves, so getting `InvalidArgument` back shows the
    /// limits were checked before any lookup was attempted.
    #[tokio::test]
    async fn bad_limits_fail_before_resolution() {
        let cfg = Config::default();
        let cases = [(0, Duration::from_millis(200)), (8, Duration::ZERO)];

        for (concurrency, limit) in cases {
            let err = scan(
                "unresolvable.invalid",
                PortRange::default(),
                concurrency,
                limit,
                &cfg,
                &TracingSink,
            )
            .await
            .unwrap_err();

            assert!(
                matches!(err.downcast_ref::<DiagError>(), Some(DiagError::InvalidArgument(_))),
                "{err:#}"
            );
        }
    }
}
