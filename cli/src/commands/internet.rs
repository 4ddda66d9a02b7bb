use colored::*;
use tracing::Instrument;

use crate::mprint;
use crate::terminal::{colors, print, spinner};
use netdiag_common::{
    config::{Config, PUBLIC_IP_ENDPOINTS},
    models::PublicIpOutcome,
    sink::{DiagnosticSink, Severity, record_outcome},
    success, warn,
};
use netdiag_core::PublicIpResolver;

pub async fn public_ip(
    endpoints: &[String],
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    let resolver = PublicIpResolver::with_timeout(cfg.http_timeout)?;
    let span = spinner::spinner_span("asking echo services for the public address");

    let outcome: PublicIpOutcome = match endpoints.is_empty() {
        true => resolver.resolve_public_ip(PUBLIC_IP_ENDPOINTS).instrument(span).await,
        false => resolver.resolve_public_ip(endpoints).instrument(span).await,
    };

    match (&outcome, cfg.quiet) {
        (PublicIpOutcome::Resolved(addr), 2) => mprint!(addr),
        (PublicIpOutcome::Resolved(addr), _) => {
            success!("public IP: {}", addr.color(colors::IPV4_ADDR).bold())
        }
        (PublicIpOutcome::Unresolved, _) => warn!("{outcome}"),
    }

    let level = match outcome {
        PublicIpOutcome::Resolved(_) => Severity::Info,
        PublicIpOutcome::Unresolved => Severity::Warning,
    };
    record_outcome(sink, level, &format!("public-ip: {outcome}"));
    Ok(())
}

pub async fn connectivity(url: &str, cfg: &Config, sink: &dyn DiagnosticSink) -> anyhow::Result<()> {
    let resolver = PublicIpResolver::with_timeout(cfg.http_timeout)?;
    let span = spinner::spinner_span(&format!("contacting {url}"));
    let online: bool = resolver.check_connectivity(url).instrument(span).await;

    match (online, cfg.quiet) {
        (true, 2) => mprint!("online"),
        (false, 2) => mprint!("offline"),
        (true, _) => success!("internet is reachable ({url})"),
        (false, _) => {
            warn!("internet is not reachable ({url})");
            print::status(format!("{}", "check the gateway and DNS settings".color(colors::MUTED)));
        }
    }

    let (level, state) = match online {
        true => (Severity::Info, "online"),
        false => (Severity::Warning, "offline"),
    };
    record_outcome(sink, level, &format!("connectivity {url}: {state}"));
    Ok(())
}
