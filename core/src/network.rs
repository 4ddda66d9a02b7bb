//! I/O seams of the diagnostic engines.
//!
//! Each engine talks to the network only through one of the traits below, so
//! tests can substitute in-memory doubles and the engines stay free of socket code.

pub mod dns;
pub mod http;
pub mod icmp;
pub mod tcp;

pub use dns::{DnsBackend, SystemDns};
pub use http::{HttpFetcher, ReqwestFetcher};
pub use icmp::{EchoOutcome, EchoTransport, IcmpTransport};
pub use tcp::{Connector, TcpConnector};
