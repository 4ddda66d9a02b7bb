//! Single-host reachability probing.
//!
//! [`Prober::probe`] is total: every failure, from an unresolvable name to a
//! socket the OS refuses to open, comes back as an unreachable [`ProbeResult`].

use std::sync::Arc;
use std::time::Duration;

use netdiag_common::{
    debug,
    error::{DiagResult, ErrorKind},
    models::{PingSummary, ProbeResult},
};

use crate::network::{DnsBackend, EchoOutcome, EchoTransport, IcmpTransport, SystemDns};
use crate::resolver::Resolver;

/// Slack on top of the caller's timeout before the whole probe is abandoned.
const TIMEOUT_GRACE: Duration = Duration::from_millis(250);

/// Called by [`Prober::ping`] with the 1-based sequence number of each settled probe.
pub type ReplyCallback = Box<dyn Fn(usize, &ProbeResult) + Send + Sync>;

pub struct Prober {
    transport: Arc<dyn EchoTransport>,
    resolver: Resolver,
    on_reply: Option<ReplyCallback>,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(Arc::new(IcmpTransport::new()), Arc::new(SystemDns))
    }
}

impl Prober {
    pub fn new(transport: Arc<dyn EchoTransport>, dns: Arc<dyn DnsBackend>) -> Self {
        Self {
            transport,
            resolver: Resolver::new(dns),
            on_reply: None,
        }
    }

    pub fn with_progress(mut self, callback: ReplyCallback) -> Self {
        self.on_reply = Some(callback);
        self
    }

    /// Sends one echo probe to `host` and waits up to `limit` for the reply.
    pub async fn probe(&self, host: &str, limit: Duration) -> ProbeResult {
        match tokio::time::timeout(limit + TIMEOUT_GRACE, self.try_probe(host, limit)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                debug!("probe of {host} failed: {e}");
                ProbeResult::unreachable(host, Some(e.kind()))
            }
            Err(_elapsed) => ProbeResult::unreachable(host, Some(ErrorKind::Timeout)),
        }
    }

    /// Probes `host` `count` times, one after the other, pausing `interval` in between.
    pub async fn ping(
        &self,
        host: &str,
        count: usize,
        limit: Duration,
        interval: Duration,
    ) -> PingSummary {
        let mut results: Vec<ProbeResult> = Vec::with_capacity(count);
        for idx in 0..count {
            if idx > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            let result: ProbeResult = self.probe(host, limit).await;
            if let Some(callback) = &self.on_reply {
                callback(idx + 1, &result);
            }
            results.push(result);
        }
        PingSummary::from_results(host, &results)
    }

    async fn try_probe(&self, host: &str, limit: Duration) -> DiagResult<ProbeResult> {
        let target = self.resolver.resolve_target(host).await?;

        let result = match self.transport.echo(target, None, limit).await? {
            EchoOutcome::Reply { rtt, .. } => ProbeResult::reachable(host, rtt),
            EchoOutcome::NoReply => ProbeResult::unreachable(host, Some(ErrorKind::Timeout)),
            EchoOutcome::TimeExceeded { from, .. } | EchoOutcome::Unreachable { from, .. } => {
                debug!("{from} reported {target} as unreachable");
                ProbeResult::unreachable(host, Some(ErrorKind::Transport))
            }
        };
        Ok(result)
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
