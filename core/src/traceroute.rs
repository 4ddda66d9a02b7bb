//! TTL-stepped path discovery.
//!
//! Sends one echo probe per TTL, starting at 1, and records who answered.
//! The chain stops at the destination, at `max_hops`, or at the first probe
//! that cannot be sent.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use netdiag_common::{
    debug,
    error::{DiagError, DiagResult},
    models::{HopStatus, TracerouteHop},
    warn,
};

use crate::network::{DnsBackend, EchoOutcome, EchoTransport, IcmpTransport, SystemDns};
use crate::resolver::Resolver;

pub struct TracerouteEngine {
    transport: Arc<dyn EchoTransport>,
    resolver: Resolver,
}

impl Default for TracerouteEngine {
    fn default() -> Self {
        Self::new(Arc::new(IcmpTransport::new()), Arc::new(SystemDns))
    }
}

impl TracerouteEngine {
    pub fn new(transport: Arc<dyn EchoTransport>, dns: Arc<dyn DnsBackend>) -> Self {
        Self {
            transport,
            resolver: Resolver::new(dns),
        }
    }

    /// Traces the route to `host`.
    ///
    /// Only a `max_hops` of zero is an error. Everything that goes wrong on the
    /// wire ends up in the returned hops, the last of which carries
    /// [`HopStatus::Error`] when the chain was cut short.
    pub async fn traceroute(
        &self,
        host: &str,
        max_hops: u8,
        per_hop_timeout: Duration,
    ) -> DiagResult<Vec<TracerouteHop>> {
        if max_hops == 0 {
            return Err(DiagError::invalid("max hops must be at least 1"));
        }

        let target: IpAddr = match self.resolver.resolve_target(host).await {
            Ok(target) => target,
            Err(e) => {
                warn!("cannot trace {host}: {e}");
                return Ok(vec![TracerouteHop::error(1, e.to_string())]);
            }
        };

        let mut hops: Vec<TracerouteHop> = Vec::with_capacity(usize::from(max_hops));
        for ttl in 1..=max_hops {
            let hop: TracerouteHop = self.probe_hop(target, ttl, per_hop_timeout).await;
            debug!("hop {ttl}: {:?}", hop.status);

            let done: bool = hop.reached_destination || hop.is_error();
            hops.push(hop);
            if done {
                break;
            }
        }

        Ok(hops)
    }

    async fn probe_hop(&self, target: IpAddr, ttl: u8, limit: Duration) -> TracerouteHop {
        let outcome = match self.transport.echo(target, Some(ttl), limit).await {
            Ok(outcome) => outcome,
            Err(e) => return TracerouteHop::error(ttl, e.to_string()),
        };

        match outcome {
            EchoOutcome::Reply { from, rtt } => TracerouteHop {
                ttl,
                address: Some(from),
                rtt: Some(rtt),
                reached_destination: true,
                status: HopStatus::Reply,
            },
            EchoOutcome::TimeExceeded { from, rtt } | EchoOutcome::Unreachable { from, rtt } => {
                TracerouteHop {
                    ttl,
                    address: Some(from),
                    rtt: Some(rtt),
                    reached_destination: false,
                    status: HopStatus::Reply,
                }
            }
            EchoOutcome::NoReply => TracerouteHop::timed_out(ttl),
        }
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
    use async_trait::async_trait;
    use std::io;
    use std::net::Ipv4Addr;
    use std::sync::Mutex;

    /// A simulated path: routers at TTL 1..=len, the destination one further.
    /// `silent` TTLs drop the probe, `fail_at` refuses to send.
    struct FakePath {
        routers: Vec<IpAddr>,
        silent: Vec<u8>,
        fail_at: Option<u8>,
        sent: Mutex<Vec<u8>>,
    }

    impl FakePath {
        fn new(router_count: u8) -> Self {
            Self {
                routers: (1..=router_count)
                    .map(|n| IpAddr::V4(Ipv4Addr::new(10, 0, 0, n)))
                    .collect(),
                silent: Vec::new(),
                fail_at: None,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<u8> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EchoTransport for FakePath {
        async fn echo(
            &self,
            target: IpAddr,
            ttl: Option<u8>,
            _limit: Duration,
        ) -> DiagResult<EchoOutcome> {
            let ttl = ttl.expect("traceroute always sets a ttl");
            self.sent.lock().unwrap().push(ttl);

            if self.fail_at == Some(ttl) {
                return Err(DiagError::Transport(io::Error::from(
                    io::ErrorKind::PermissionDenied,
                )));
            }
            if self.silent.contains(&ttl) {
                return Ok(EchoOutcome::NoReply);
            }
            let rtt = Duration::from_millis(u64::from(ttl));
            match self.routers.get(usize::from(ttl) - 1) {
                Some(&router) => Ok(EchoOutcome::TimeExceeded { from: router, rtt }),
                None => Ok(EchoOutcome::Reply { from: target, rtt }),
            }
        }
    }

    struct NoDns;

    #[async_trait]
    impl DnsBackend for NoDns {
        async fn lookup_host(&self, _name: &str) -> io::Result<Vec<IpAddr>> {
            Err(io::Error::new(io::ErrorKind::NotFound, "NXDOMAIN"))
        }

        async fn lookup_addr(&self, _addr: IpAddr) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "NXDOMAIN"))
        }
    }

    const DEST: &str = "192.0.2.1";
    const LIMIT: Duration = Duration::from_millis(10);

    fn engine(path: FakePath) -> (TracerouteEngine, Arc<FakePath>) {
        let path = Arc::new(path);
        (TracerouteEngine::new(path.clone(), Arc::new(NoDns)), path)
    }

    fn assert_ordered(hops: &[TracerouteHop]) {
        for (idx, hop) in hops.iter().enumerate() {
            assert_eq!(usize::from(hop.ttl), idx + 1);
        }
    }

    #[tokio::test]
    async fn stops_at_destination() {
        let (engine, path) = engine(FakePath::new(3));

        let hops = engine.traceroute(DEST, 30, LIMIT).await.unwrap();

        assert_eq!(hops.len(), 4);
        assert_ordered(&hops);
        assert!(hops[..3].iter().all(|h| !h.reached_destination));
        assert_eq!(hops[1].address, Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))));

        let last = hops.last().unwrap();
        assert!(last.reached_destination);
        assert_eq!(last.address, Some(DEST.parse().unwrap()));
        assert_eq!(path.sent(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn never_exceeds_max_hops() {
        let (engine, path) = engine(FakePath::new(50));

        let hops = engine.traceroute(DEST, 5, LIMIT).await.unwrap();

        assert_eq!(hops.len(), 5);
        assert_ordered(&hops);
        assert!(hops.iter().all(|h| !h.reached_destination));
        assert_eq!(path.sent().len(), 5);
    }

    #[tokio::test]
    async fn silent_hops_are_recorded_and_skipped() {
        let mut path = FakePath::new(3);
        path.silent = vec![2];
        let (engine, _) = engine(path);

        let hops = engine.traceroute(DEST, 30, LIMIT).await.unwrap();

        assert_eq!(hops.len(), 4);
        assert_eq!(hops[1].status, HopStatus::TimedOut);
        assert_eq!(hops[1].address, None);
        assert!(hops[3].reached_destination);
    }

    #[tokio::test]
    async fn hard_error_ends_the_chain() {
        let mut path = FakePath::new(10);
        path.fail_at = Some(3);
        let (engine, path) = engine(path);

        let hops = engine.traceroute(DEST, 30, LIMIT).await.unwrap();

        assert_eq!(hops.len(), 3);
        assert_ordered(&hops);
        assert!(hops[2].is_error());
        assert_eq!(path.sent(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unresolvable_target_is_a_single_error_hop() {
        let (engine, path) = engine(FakePath::new(1));

        let hops = engine.traceroute("nowhere.invalid", 30, LIMIT).await.unwrap();

        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].ttl, 1);
        assert!(hops[0].is_error());
        assert!(path.sent().is_empty());
    }

    #[tokio::test]
    async fn zero_hops_is_invalid() {
        let (engine, _) = engine(FakePath::new(1));
        assert!(matches!(
            engine.traceroute(DEST, 0, LIMIT).await,
            Err(DiagError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn each_call_is_a_fresh_chain() {
        let (engine, path) = engine(FakePath::new(1));

        let first = engine.traceroute(DEST, 30, LIMIT).await.unwrap();
        let second = engine.traceroute(DEST, 30, LIMIT).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(path.sent(), vec![1, 2, 1, 2]);
    }
}
