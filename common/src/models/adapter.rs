use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;

/// A local network interface as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub name: String,
    pub is_up: bool,
    pub is_loopback: bool,
    pub mac: Option<MacAddr>,
    pub vendor: Option<String>,
    pub ips: Vec<IpNetwork>,
}

/// Cumulative traffic counters of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceStats {
    pub name: String,
    pub bytes_received: u64,
    pub bytes_transmitted: u64,
    pub packets_received: u64,
    pub packets_transmitted: u64,
    pub errors_received: u64,
    pub errors_transmitted: u64,
}
