//! # Netdiag Core
//!
//! The probing engines behind `netdiag`:
//!
//! * **[`scanner`]**: bounded-concurrency TCP connect scan over a port range.
//! * **[`traceroute`]**: TTL-stepped path discovery.
//! * **[`probe`]**: single-host ICMP reachability with round-trip time.
//! * **[`resolver`]**: forward or reverse DNS, picked from the input.
//! * **[`public_ip`]**: public address discovery with ordered fallback.
//! * **[`adapters`]**: local interface inventory.
//!
//! Engines reach the network only through the traits in [`network`]. Expected
//! network failures never surface as errors; they come back as negative
//! outcomes inside the result values of `netdiag_common::models`.

pub mod adapters;
pub mod network;
pub mod probe;
pub mod public_ip;
pub mod resolver;
pub mod scanner;
pub mod traceroute;

pub use adapters::{AdapterInventory, SystemInventory};
pub use probe::Prober;
pub use public_ip::PublicIpResolver;
pub use resolver::Resolver;
pub use scanner::PortScanner;
pub use traceroute::TracerouteEngine;
