//! Result values produced by the diagnostic engines.
//!
//! Every value is created by a single call and returned by ownership; none of
//! them is mutated after construction.

pub mod adapter;
pub mod dns;
pub mod probe;
pub mod scan;
pub mod trace;

pub use adapter::{AdapterInfo, InterfaceStats};
pub use dns::{DnsAnswer, PublicIpOutcome};
pub use probe::{PingSummary, ProbeResult};
pub use scan::{PortScanRequest, PortScanResult};
pub use trace::{HopStatus, TracerouteHop};
