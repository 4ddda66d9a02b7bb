//! Subnet boundary arithmetic.
//!
//! Works on the raw octets of an address so IPv4 and IPv6 share one code path.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{DiagError, DiagResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetBounds {
    pub network: IpAddr,
    pub broadcast: IpAddr,
}

/// Computes the network and broadcast address of `addr` under `mask`.
///
/// Both must belong to the same address family.
pub fn compute_bounds(addr: IpAddr, mask: IpAddr) -> DiagResult<SubnetBounds> {
    let addr_bytes: Vec<u8> = octets(&addr);
    let mask_bytes: Vec<u8> = octets(&mask);

    if addr_bytes.len() != mask_bytes.len() {
        return Err(DiagError::invalid(format!(
            "address {addr} and mask {mask} differ in length ({} vs {} bytes)",
            addr_bytes.len(),
            mask_bytes.len()
        )));
    }

    let network: Vec<u8> = addr_bytes
        .iter()
        .zip(&mask_bytes)
        .map(|(a, m)| a & m)
        .collect();
    let broadcast: Vec<u8> = addr_bytes
        .iter()
        .zip(&mask_bytes)
        .map(|(a, m)| a | !m)
        .collect();

    Ok(SubnetBounds {
        network: from_octets(&network)?,
        broadcast: from_octets(&broadcast)?,
    })
}

/// Builds a netmask of the same family as `family` from a prefix length.
pub fn mask_from_prefix(family: &IpAddr, prefix: u8) -> DiagResult<IpAddr> {
    let width: usize = octets(family).len() * 8;
    if usize::from(prefix) > width {
        return Err(DiagError::invalid(format!(
            "prefix /{prefix} exceeds {width} bits"
        )));
    }

    let mask: Vec<u8> = (0..width / 8)
        .map(|idx| {
            let bits_left: usize = usize::from(prefix).saturating_sub(idx * 8);
            match bits_left {
                0 => 0u8,
                1..=7 => 0xFFu8 << (8 - bits_left),
                _ => 0xFF,
            }
        })
        .collect();

    from_octets(&mask)
}

/// Parses "address/prefix" or "address mask" notation.
pub fn parse_cidr(s: &str) -> DiagResult<SubnetBounds> {
    let (addr_str, mask_str) = s
        .split_once('/')
        .or_else(|| s.split_once(' '))
        .ok_or_else(|| DiagError::invalid(format!("expected address/prefix, got '{s}'")))?;

    let addr: IpAddr = addr_str
        .trim()
        .parse()
        .map_err(|e| DiagError::invalid(format!("invalid address '{addr_str}': {e}")))?;

    let mask: IpAddr = parse_mask(&addr, mask_str.trim())?;
    compute_bounds(addr, mask)
}

/// Accepts either a dotted/colon mask or a bare prefix length.
pub fn parse_mask(addr: &IpAddr, s: &str) -> DiagResult<IpAddr> {
    let s = s.trim_start_matches('/');
    if let Ok(mask) = s.parse::<IpAddr>() {
        return Ok(mask);
    }
    let prefix: u8 = s
        .parse()
        .map_err(|e| DiagError::invalid(format!("invalid mask or prefix '{s}': {e}")))?;
    mask_from_prefix(addr, prefix)
}

fn octets(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

fn from_octets(bytes: &[u8]) -> DiagResult<IpAddr> {
    if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(v4)));
    }
    if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(v6)));
    }
    Err(DiagError::invalid(format!(
        "{} bytes is not a valid address length",
        bytes.len()
    )))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
