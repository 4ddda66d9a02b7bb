#![cfg(test)]
use netdiag_common::config::{CONNECTIVITY_URL, PUBLIC_IP_ENDPOINTS};
use netdiag_common::error::DiagError;
use netdiag_common::models::{DnsAnswer, PublicIpOutcome};
use netdiag_common::network::subnet;
use netdiag_core::adapters::{local_ip_addresses, AdapterInventory, SystemInventory};
use netdiag_core::{Prober, PublicIpResolver, Resolver, TracerouteEngine};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

#[test]
fn subnet_through_public_api() {
    let bounds = subnet::parse_cidr("10.20.30.40/255.255.240.0").unwrap();
    assert_eq!(bounds.network, IpAddr::V4(Ipv4Addr::new(10, 20, 16, 0)));
    assert_eq!(bounds.broadcast, IpAddr::V4(Ipv4Addr::new(10, 20, 31, 255)));

    let v6 = subnet::parse_cidr("2001:db8:abcd:12::1/48").unwrap();
    assert_eq!(v6.network, "2001:db8:abcd::".parse::<IpAddr>().unwrap());
    assert_eq!(
        v6.broadcast,
        "2001:db8:abcd:ffff:ffff:ffff:ffff:ffff".parse::<IpAddr>().unwrap()
    );
}

#[tokio::test]
async fn localhost_resolves_forward() {
    let answer = Resolver::default().resolve("localhost").await.unwrap();
    match answer {
        DnsAnswer::Forward(addrs) => {
            assert!(!addrs.is_empty());
            assert!(addrs.iter().all(|addr| addr.is_loopback()), "{addrs:?}");
        }
        other => panic!("expected a forward answer, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_tld_fails_to_resolve() {
    let err = Resolver::default()
        .resolve_with_timeout("no-such-host.invalid", Duration::from_secs(10))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DiagError::ResolutionFailed { .. } | DiagError::Timeout(_)),
        "{err:?}"
    );
}

#[tokio::test]
async fn literal_target_skips_dns() {
    let addr = Resolver::default().resolve_target("127.0.0.1").await.unwrap();
    assert_eq!(addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
}

#[test]
fn inventory_reports_loopback_addresses() {
    let adapters = SystemInventory.list_adapters();
    let ips = local_ip_addresses(&adapters);
    if adapters.iter().any(|adapter| adapter.is_loopback) {
        assert!(ips.iter().any(|ip| ip.is_loopback()), "{ips:?}");
    }
    for stats in SystemInventory.interface_statistics() {
        assert!(!stats.name.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn loopback_answers_echo() {
    let result = Prober::default().probe("127.0.0.1", Duration::from_secs(1)).await;
    assert!(result.success, "{result:?}");
    assert!(result.latency.is_some());
}

#[tokio::test]
#[ignore]
async fn trace_to_loopback_is_one_hop() {
    let hops = TracerouteEngine::default()
        .traceroute("127.0.0.1", 5, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(hops.len(), 1);
    assert!(hops[0].reached_destination);
}

#[tokio::test]
#[ignore]
async fn public_ip_is_discovered() {
    let outcome = PublicIpResolver::default().resolve_public_ip(PUBLIC_IP_ENDPOINTS).await;
    let addr = match outcome {
        PublicIpOutcome::Resolved(addr) => addr,
        PublicIpOutcome::Unresolved => panic!("no echo service answered"),
    };
    assert!(addr.parse::<IpAddr>().is_ok(), "{addr}");
}

#[tokio::test]
#[ignore]
async fn internet_is_reachable() {
    assert!(PublicIpResolver::default().check_connectivity(CONNECTIVITY_URL).await);
}
