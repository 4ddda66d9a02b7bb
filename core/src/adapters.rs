//! Local interface inventory. No remote I/O happens here.

use std::collections::HashSet;
use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};
use pnet::util::MacAddr;
use sysinfo::{NetworkExt, NetworksExt, System, SystemExt};

use netdiag_common::{
    models::{AdapterInfo, InterfaceStats},
    network::mac,
};

pub trait AdapterInventory {
    fn list_adapters(&self) -> Vec<AdapterInfo>;
    fn interface_statistics(&self) -> Vec<InterfaceStats>;
}

pub struct SystemInventory;

impl AdapterInventory for SystemInventory {
    fn list_adapters(&self) -> Vec<AdapterInfo> {
        let mut interfaces: Vec<NetworkInterface> = datalink::interfaces();
        interfaces.sort_by_key(priority);
        interfaces.iter().map(to_adapter_info).collect()
    }

    fn interface_statistics(&self) -> Vec<InterfaceStats> {
        let loopbacks: HashSet<String> = datalink::interfaces()
            .into_iter()
            .filter(|intf| intf.is_loopback())
            .map(|intf| intf.name)
            .collect();

        let mut sys = System::new();
        sys.refresh_networks_list();
        sys.refresh_networks();

        let mut stats: Vec<InterfaceStats> = sys
            .networks()
            .iter()
            .filter(|(name, _)| !loopbacks.contains(name.as_str()))
            .map(|(name, data)| InterfaceStats {
                name: name.clone(),
                bytes_received: data.total_received(),
                bytes_transmitted: data.total_transmitted(),
                packets_received: data.total_packets_received(),
                packets_transmitted: data.total_packets_transmitted(),
                errors_received: data.total_errors_on_received(),
                errors_transmitted: data.total_errors_on_transmitted(),
            })
            .collect();
        stats.sort_by(|a, b| a.name.cmp(&b.name));
        stats
    }
}

/// MAC addresses of all adapters that have a non-zero one.
pub fn mac_addresses(adapters: &[AdapterInfo]) -> Vec<MacAddr> {
    adapters
        .iter()
        .filter_map(|adapter| adapter.mac)
        .filter(|mac| *mac != MacAddr::zero())
        .collect()
}

/// Every unicast address assigned to any adapter.
pub fn local_ip_addresses(adapters: &[AdapterInfo]) -> Vec<IpAddr> {
    adapters
        .iter()
        .flat_map(|adapter| adapter.ips.iter().map(|net| net.ip()))
        .collect()
}

fn to_adapter_info(intf: &NetworkInterface) -> AdapterInfo {
    let mac: Option<MacAddr> = intf.mac.filter(|mac| *mac != MacAddr::zero());
    AdapterInfo {
        name: intf.name.clone(),
        is_up: intf.is_up(),
        is_loopback: intf.is_loopback(),
        mac,
        vendor: mac.and_then(mac::get_vendor),
        ips: intf.ips.clone(),
    }
}

/// Up before down, physical before virtual, loopback last.
fn priority(intf: &NetworkInterface) -> (bool, bool, bool, String) {
    (
        intf.is_loopback(),
        !intf.is_up(),
        !is_physical(intf),
        intf.name.clone(),
    )
}

#[cfg(target_os = "linux")]
fn is_physical(intf: &NetworkInterface) -> bool {
    std::path::Path::new(&format!("/sys/class/net/{}/device", intf.name)).exists()
}

#[cfg(not(target_os = "linux"))]
fn is_physical(intf: &NetworkInterface) -> bool {
    intf.mac.is_some_and(|mac| mac != MacAddr::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::ipnetwork::{IpNetwork, Ipv4Network};
    use std::net::Ipv4Addr;

    fn adapter(name: &str, mac: Option<MacAddr>, ips: &[IpNetwork]) -> AdapterInfo {
        AdapterInfo {
            name: name.into(),
            is_up: true,
            is_loopback: false,
            mac,
            vendor: None,
            ips: ips.to_vec(),
        }
    }

    fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
        IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
    }

    #[test]
    fn views_flatten_adapters() {
        let adapters = vec![
            adapter("lo", None, &[v4(127, 0, 0, 1, 8)]),
            adapter(
                "eth0",
                Some(MacAddr::new(0x00, 0x1b, 0x21, 0x3c, 0x4d, 0x5e)),
                &[v4(192, 168, 1, 20, 24), v4(10, 0, 0, 5, 8)],
            ),
            adapter("tun0", Some(MacAddr::zero()), &[]),
        ];

        assert_eq!(
            mac_addresses(&adapters),
            vec![MacAddr::new(0x00, 0x1b, 0x21, 0x3c, 0x4d, 0x5e)]
        );
        assert_eq!(
            local_ip_addresses(&adapters),
            vec![
                IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
                IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            ]
        );
    }

    #[test]
    fn inventory_lists_loopback_last() {
        let adapters = SystemInventory.list_adapters();
        if let Some(pos) = adapters.iter().position(|a| a.is_loopback) {
            assert!(adapters[pos..].iter().all(|a| a.is_loopback));
        }
    }
}
