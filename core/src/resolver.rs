//! # DNS Dispatch
//!
//! Chooses between a forward and a reverse lookup from the shape of the input:
//! an IP literal is looked up in reverse, anything else forward.

use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use netdiag_common::{
    debug,
    error::{DiagError, DiagResult},
    models::DnsAnswer,
};

use crate::network::{DnsBackend, SystemDns};

pub struct Resolver {
    backend: Arc<dyn DnsBackend>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemDns))
    }
}

impl Resolver {
    pub fn new(backend: Arc<dyn DnsBackend>) -> Self {
        Self { backend }
    }

    /// Resolves `input` to a [`DnsAnswer`].
    ///
    /// Fails with [`DiagError::ResolutionFailed`] when the backend errors or
    /// returns nothing; a partially filled answer is never produced.
    pub async fn resolve(&self, input: &str) -> DiagResult<DnsAnswer> {
        let input: &str = input.trim();
        if input.is_empty() {
            return Err(DiagError::invalid("empty host name"));
        }

        match input.parse::<IpAddr>() {
            Ok(addr) => self.reverse_lookup(input, addr).await.map(DnsAnswer::Reverse),
            Err(_) => self.forward_lookup(input).await.map(DnsAnswer::Forward),
        }
    }

    async fn forward_lookup(&self, input: &str) -> DiagResult<Vec<IpAddr>> {
        debug!("forward lookup for {input}");
        let addrs: Vec<IpAddr> = self
            .backend
            .lookup_host(input)
            .await
            .map_err(|source| resolution_failed(input, source))?;
        if addrs.is_empty() {
            return Err(resolution_failed(input, empty_answer()));
        }
        Ok(addrs)
    }

    async fn reverse_lookup(&self, input: &str, addr: IpAddr) -> DiagResult<String> {
        debug!("reverse lookup for {addr}");
        let hostname: String = self
            .backend
            .lookup_addr(addr)
            .await
            .map_err(|source| resolution_failed(input, source))?;
        if hostname.is_empty() {
            return Err(resolution_failed(input, empty_answer()));
        }
        Ok(hostname)
    }

    /// [`Resolver::resolve`] bounded by `limit`; elapsing yields [`DiagError::Timeout`].
    pub async fn resolve_with_timeout(&self, input: &str, limit: Duration) -> DiagResult<DnsAnswer> {
        tokio::time::timeout(limit, self.resolve(input))
            .await
            .map_err(|_| DiagError::Timeout(limit))?
    }

    /// Turns a host argument into one address to probe.
    ///
    /// IP literals are used as is; names take the first forward answer, IPv4 preferred.
    pub async fn resolve_target(&self, host: &str) -> DiagResult<IpAddr> {
        let host: &str = host.trim();
        if let Ok(addr) = host.parse::<IpAddr>() {
            return Ok(addr);
        }
        if host.is_empty() {
            return Err(DiagError::invalid("empty host name"));
        }
        let addrs: Vec<IpAddr> = self.forward_lookup(host).await?;
        Ok(addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .copied()
            .unwrap_or(addrs[0]))
    }
}

fn resolution_failed(input: &str, source: io::Error) -> DiagError {
    DiagError::ResolutionFailed {
        input: input.to_owned(),
        source,
    }
}

fn empty_answer() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "empty answer")
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
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Path {
        Forward(String),
        Reverse(IpAddr),
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<Path>>,
        fail: bool,
        delay: Option<Duration>,
        empty: bool,
    }

    impl RecordingBackend {
        fn calls(&self) -> Vec<Path> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DnsBackend for RecordingBackend {
        async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>> {
            self.calls.lock().unwrap().push(Path::Forward(name.to_owned()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "NXDOMAIN"));
            }
            if self.empty {
                return Ok(Vec::new());
            }
            Ok(vec![
                IpAddr::V6(Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0, 0, 0, 0x68)),
                IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            ])
        }

        async fn lookup_addr(&self, addr: IpAddr) -> io::Result<String> {
            self.calls.lock().unwrap().push(Path::Reverse(addr));
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "NXDOMAIN"));
            }
            Ok("dns.google".to_owned())
        }
    }

    fn resolver_with(backend: RecordingBackend) -> (Resolver, Arc<RecordingBackend>) {
        let backend = Arc::new(backend);
        (Resolver::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn ip_literal_takes_reverse_path() {
        let (resolver, backend) = resolver_with(RecordingBackend::default());

        let answer = resolver.resolve("8.8.8.8").await.unwrap();

        assert_eq!(answer, DnsAnswer::Reverse("dns.google".into()));
        assert_eq!(
            backend.calls(),
            vec![Path::Reverse(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)))]
        );
    }

    #[tokio::test]
    async fn name_takes_forward_path() {
        let (resolver, backend) = resolver_with(RecordingBackend::default());

        let answer = resolver.resolve("example.com").await.unwrap();

        assert!(matches!(answer, DnsAnswer::Forward(ref addrs) if addrs.len() == 2));
        assert_eq!(backend.calls(), vec![Path::Forward("example.com".into())]);
    }

    #[tokio::test]
    async fn failures_carry_the_cause() {
        let (resolver, _) = resolver_with(RecordingBackend {
            fail: true,
            ..Default::default()
        });

        match resolver.resolve("nope.invalid").await {
            Err(DiagError::ResolutionFailed { input, source }) => {
                assert_eq!(input, "nope.invalid");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
        assert!(matches!(
            resolver.resolve("::1").await,
            Err(DiagError::ResolutionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn empty_answer_is_a_failure() {
        let (resolver, _) = resolver_with(RecordingBackend {
            empty: true,
            ..Default::default()
        });
        assert!(matches!(
            resolver.resolve("example.com").await,
            Err(DiagError::ResolutionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn empty_input_is_invalid() {
        let (resolver, backend) = resolver_with(RecordingBackend::default());
        assert!(matches!(
            resolver.resolve("  ").await,
            Err(DiagError::InvalidArgument(_))
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn external_timeout_applies() {
        let (resolver, _) = resolver_with(RecordingBackend {
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });

        let result = resolver
            .resolve_with_timeout("slow.example", Duration::from_millis(20))
            .await;
        assert!(matches!(result, Err(DiagError::Timeout(_))));
    }

    #[tokio::test]
    async fn target_prefers_ipv4() {
        let (resolver, backend) = resolver_with(RecordingBackend::default());

        let target = resolver.resolve_target("example.com").await.unwrap();
        assert_eq!(target, IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)));

        let literal = resolver.resolve_target("10.0.0.1").await.unwrap();
        assert_eq!(literal, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(backend.calls().len(), 1);
    }
}
