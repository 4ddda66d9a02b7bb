use std::io;
use std::net::IpAddr;

use async_trait::async_trait;

#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// Name to addresses.
    async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>>;
    /// Address to name.
    async fn lookup_addr(&self, addr: IpAddr) -> io::Result<String>;
}

/// The operating system resolver (`getaddrinfo` / `getnameinfo`).
///
/// Both calls block, so they run on tokio's blocking pool. The OS gives no
/// way to bound them; callers wrap them in a timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDns;

#[async_trait]
impl DnsBackend for SystemDns {
    async fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        let name: String = name.to_owned();
        tokio::task::spawn_blocking(move || dns_lookup::lookup_host(&name))
            .await
            .map_err(io::Error::other)?
    }

    async fn lookup_addr(&self, addr: IpAddr) -> io::Result<String> {
        let hostname: String = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&addr))
            .await
            .map_err(io::Error::other)??;

        // getnameinfo falls back to the numeric form when no PTR record exists
        if hostname == addr.to_string() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no PTR record for {addr}"),
            ));
        }
        Ok(hostname)
    }
}
