use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns `true` iff a TCP handshake with `addr` completes within `limit`.
    async fn connect(&self, addr: SocketAddr, limit: Duration) -> bool;
}

/// Plain TCP connect through the tokio reactor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddr, limit: Duration) -> bool {
        // The stream is dropped, and the socket closed, before returning.
        match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(_)) | Err(_) => false,
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
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connect_should_find_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(TcpConnector.connect(addr, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn connect_should_fail_on_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(!TcpConnector.connect(addr, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    #[ignore]
    async fn connect_should_timeout_on_unreachable_ip() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1)), 443);
        assert!(!TcpConnector.connect(addr, Duration::from_millis(100)).await);
    }
}
