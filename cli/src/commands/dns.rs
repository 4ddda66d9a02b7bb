use std::time::Duration;

use colored::*;
use tracing::Instrument;

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};
use netdiag_common::{
    config::Config,
    error::DiagError,
    models::DnsAnswer,
    sink::{DiagnosticSink, Severity, record_outcome},
    success,
};
use netdiag_core::Resolver;

pub async fn dns(
    target: &str,
    limit: Duration,
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    print::header(&format!("dns lookup: {target}"), cfg.quiet);

    let span = spinner::spinner_span(&format!("resolving {target}"));
    let answer: Result<DnsAnswer, DiagError> = Resolver::default()
        .resolve_with_timeout(target, limit)
        .instrument(span)
        .await;

    let answer: DnsAnswer = match answer {
        Ok(answer) => answer,
        Err(e) => {
            record_outcome(sink, Severity::Error, &format!("dns {target}: {e}"));
            return Err(e.into());
        }
    };

    match &answer {
        DnsAnswer::Forward(addrs) => {
            for addr in addrs {
                match cfg.quiet {
                    2 => mprint!(&addr.to_string()),
                    _ => {
                        let (kind, value) = format::ip_to_detail(addr);
                        print::status(format!("{} {}", kind.color(colors::PRIMARY), value));
                    }
                }
            }
            if cfg.quiet < 2 {
                success!("{target} resolves to {} addresses", addrs.len());
            }
        }
        DnsAnswer::Reverse(name) => match cfg.quiet {
            2 => mprint!(name),
            _ => success!("{target} points to {}", name.color(colors::PRIMARY)),
        },
    }

    record_outcome(sink, Severity::Info, &format!("dns {target}: {}", answer_line(&answer)));
    Ok(())
}

fn answer_line(answer: &DnsAnswer) -> String {
    match answer {
        DnsAnswer::Forward(addrs) => addrs
            .iter()
            .map(|addr| addr.to_string())
            .collect::<Vec<String>>()
            .join(", "),
        DnsAnswer::Reverse(name) => name.clone(),
    }
}
