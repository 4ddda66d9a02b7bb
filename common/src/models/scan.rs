use std::collections::BTreeSet;
use std::net::IpAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::{DiagError, DiagResult};
use crate::network::ports::PortRange;

/// A validated TCP connect scan request.
///
/// Fields are private so the range and concurrency invariants established by
/// [`PortScanRequest::new`] cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortScanRequest {
    host: IpAddr,
    ports: PortRange,
    connect_timeout: Duration,
    max_concurrency: usize,
}

impl PortScanRequest {
    pub fn new(
        host: IpAddr,
        ports: PortRange,
        connect_timeout: Duration,
        max_concurrency: usize,
    ) -> DiagResult<Self> {
        Self::check_limits(connect_timeout, max_concurrency)?;
        Ok(Self {
            host,
            ports,
            connect_timeout,
            max_concurrency,
        })
    }

    /// The host-independent part of [`PortScanRequest::new`], for callers
    /// that must reject bad limits before resolving the target.
    pub fn check_limits(connect_timeout: Duration, max_concurrency: usize) -> DiagResult<()> {
        if max_concurrency == 0 {
            return Err(DiagError::invalid("max concurrency must be at least 1"));
        }
        if connect_timeout.is_zero() {
            return Err(DiagError::invalid("connect timeout must be greater than zero"));
        }
        Ok(())
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn ports(&self) -> RangeInclusive<u16> {
        self.ports.start()..=self.ports.end()
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

/// Open ports found by a scan. Closed, refused and filtered ports are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortScanResult {
    pub open_ports: BTreeSet<u16>,
    /// Number of connect attempts that settled.
    pub attempted: usize,
}

impl PortScanResult {
    pub fn is_open(&self, port: u16) -> bool {
        self.open_ports.contains(&port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn limits_are_checked_without_a_host() {
        assert!(PortScanRequest::check_limits(Duration::from_millis(200), 1).is_ok());
        assert!(matches!(
            PortScanRequest::check_limits(Duration::from_millis(200), 0),
            Err(DiagError::InvalidArgument(_))
        ));
        assert!(matches!(
            PortScanRequest::check_limits(Duration::ZERO, 8),
            Err(DiagError::InvalidArgument(_))
        ));
    }

    #[test]
    fn request_exposes_range() {
        let request = PortScanRequest::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            PortRange::new(20, 25).unwrap(),
            Duration::from_millis(100),
            4,
        )
        .unwrap();
        assert_eq!(request.port_count(), 6);
        assert_eq!(request.ports(), 20..=25);
    }
}
