use crate::terminal::colors;
use colored::*;
use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte: u8 = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

pub fn ip_to_detail(ip: &IpAddr) -> Detail {
    match ip {
        IpAddr::V4(ipv4_addr) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        IpAddr::V6(ipv6_addr) => (
            String::from(ipv6_to_type_str(ipv6_addr)),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

pub fn ip_colored(ip: &IpAddr) -> ColoredString {
    ip_to_detail(ip).1
}

/// `12.34ms`, or `<1ms` below a millisecond.
pub fn latency(rtt: Duration) -> String {
    let millis: f64 = rtt.as_secs_f64() * 1_000.0;
    if millis < 1.0 {
        return String::from("<1ms");
    }
    format!("{millis:.2}ms")
}

pub fn elapsed(total: Duration) -> ColoredString {
    format!("{:.2}s", total.as_secs_f64()).bold().yellow()
}

pub fn yes_no(value: bool) -> ColoredString {
    match value {
        true => "yes".color(colors::GOOD),
        false => "no".color(colors::BAD),
    }
}

/// Human readable byte count using binary prefixes.
pub fn bytes(count: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value: f64 = count as f64;
    let mut unit: usize = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    match unit {
        0 => format!("{count} B"),
        _ => format!("{value:.1} {}", UNITS[unit]),
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

    #[test]
    fn ipv6_types() {
        assert_eq!(ipv6_to_type_str(&"2001:db8::1".parse().unwrap()), "GUA");
        assert_eq!(ipv6_to_type_str(&"fd00::1".parse().unwrap()), "ULA");
        assert_eq!(ipv6_to_type_str(&"fe80::1".parse().unwrap()), "LLA");
        assert_eq!(ipv6_to_type_str(&"::1".parse().unwrap()), "IPv6");
    }

    #[test]
    fn latency_formatting() {
        assert_eq!(latency(Duration::from_micros(300)), "<1ms");
        assert_eq!(latency(Duration::from_micros(12_345)), "12.35ms");
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(bytes(512), "512 B");
        assert_eq!(bytes(2048), "2.0 KiB");
        assert_eq!(bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
