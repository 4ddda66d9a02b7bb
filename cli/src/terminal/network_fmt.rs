use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};
use colored::*;
use netdiag_common::models::{AdapterInfo, HopStatus, InterfaceStats, TracerouteHop};
use pnet::ipnetwork::IpNetwork;

pub fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<Detail> {
    ip_net
        .iter()
        .map(|ip_network| match ip_network {
            IpNetwork::V4(ipv4_network) => {
                let address: ColoredString = ipv4_network.ip().to_string().color(colors::IPV4_ADDR);
                let prefix: ColoredString =
                    ipv4_network.prefix().to_string().color(colors::IPV4_PREFIX);
                let result: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv4".to_string(), result)
            }
            IpNetwork::V6(ipv6_network) => {
                let address: ColoredString = ipv6_network.ip().to_string().color(colors::IPV6_ADDR);
                let prefix: ColoredString =
                    ipv6_network.prefix().to_string().color(colors::IPV6_PREFIX);
                let value: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                let key: &str = format::ipv6_to_type_str(&ipv6_network.ip());
                (key.to_string(), value)
            }
        })
        .collect()
}

pub fn print_adapter(adapter: &AdapterInfo, stats: Option<&InterfaceStats>, idx: usize) {
    let mut details: Vec<Detail> = vec![("Up".to_string(), format::yes_no(adapter.is_up))];
    details.extend(to_key_value_pair_net(&adapter.ips));

    if let Some(mac_addr) = adapter.mac {
        details.push((
            "MAC".to_string(),
            mac_addr.to_string().color(colors::MAC_ADDR),
        ));
    }
    if let Some(vendor) = &adapter.vendor {
        details.push(("Vendor".to_string(), vendor.normal()));
    }
    if let Some(stats) = stats {
        details.push((
            "RX".to_string(),
            format!(
                "{} / {} packets / {} errors",
                format::bytes(stats.bytes_received),
                stats.packets_received,
                stats.errors_received
            )
            .normal(),
        ));
        details.push((
            "TX".to_string(),
            format!(
                "{} / {} packets / {} errors",
                format::bytes(stats.bytes_transmitted),
                stats.packets_transmitted,
                stats.errors_transmitted
            )
            .normal(),
        ));
    }
    print::tree(idx, &adapter.name, &details);
}

pub fn hop_line(hop: &TracerouteHop) -> String {
    let ttl: ColoredString = format!("{:>2}", hop.ttl).color(colors::ACCENT);
    let body: String = match (&hop.status, hop.address, hop.rtt) {
        (HopStatus::Reply, Some(addr), Some(rtt)) => {
            let marker: &str = if hop.reached_destination { " (destination)" } else { "" };
            format!(
                "{}  {}{}",
                format::ip_colored(&addr),
                format::latency(rtt).color(colors::TEXT_DEFAULT),
                marker.green()
            )
        }
        (HopStatus::Reply, Some(addr), None) => format!("{}", format::ip_colored(&addr)),
        (HopStatus::Error(reason), _, _) => format!("{}", reason.color(colors::BAD)),
        _ => format!("{}", "*".color(colors::MUTED)),
    };
    format!("{} {}", ttl, body)
}
