#![cfg(test)]
use netdiag_common::models::{PortScanRequest, PortScanResult};
use netdiag_common::network::ports::PortRange;
use netdiag_core::PortScanner;
use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio::net::TcpListener;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Binds an ephemeral port, plus a neighbour two ports up when that one is free.
async fn listeners() -> (Vec<TcpListener>, u16) {
    let first = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let port = first.local_addr().unwrap().port();
    let mut held = vec![first];
    if let Some(neighbour) = port.checked_add(2) {
        if let Ok(listener) = TcpListener::bind((LOCALHOST, neighbour)).await {
            held.push(listener);
        }
    }
    (held, port)
}

fn held_ports(held: &[TcpListener]) -> BTreeSet<u16> {
    held.iter()
        .map(|listener| listener.local_addr().unwrap().port())
        .collect()
}

fn window(port: u16) -> PortRange {
    PortRange::new(port.saturating_sub(5), port.saturating_add(5)).unwrap()
}

/// Listening ports on loopback are found no matter how many workers run.
#[tokio::test]
async fn scan_finds_loopback_listeners() {
    let (held, port) = listeners().await;
    let expected = held_ports(&held);
    let range = window(port);

    let mut previous: Option<BTreeSet<u16>> = None;
    for concurrency in [1, 8, 256] {
        let request =
            PortScanRequest::new(LOCALHOST, range, Duration::from_millis(500), concurrency)
                .unwrap();

        let result: PortScanResult = PortScanner::default().scan(&request).await;

        assert_eq!(result.attempted, range.len());
        assert!(
            expected.is_subset(&result.open_ports),
            "missing listeners: expected {:?} in {:?}",
            expected,
            result.open_ports
        );
        if let Some(previous) = &previous {
            assert_eq!(previous, &result.open_ports);
        }
        previous = Some(result.open_ports);
    }
}

#[tokio::test]
async fn released_port_reads_closed() {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let request = PortScanRequest::new(
        LOCALHOST,
        PortRange::new(port, port).unwrap(),
        Duration::from_millis(200),
        1,
    )
    .unwrap();

    let result = PortScanner::default().scan(&request).await;

    assert_eq!(result.attempted, 1);
    assert!(!result.is_open(port));
}

/// A documentation-only address never answers; every port still settles.
#[tokio::test]
async fn unroutable_host_settles_every_port() {
    let request = PortScanRequest::new(
        IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
        PortRange::new(1, 20).unwrap(),
        Duration::from_millis(50),
        20,
    )
    .unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        PortScanner::default().scan(&request),
    )
    .await
    .expect("scan did not finish");

    assert_eq!(result.attempted, 20);
    assert!(result.open_ports.is_empty());
}

#[test]
fn zero_concurrency_is_rejected() {
    let range = PortRange::new(1, 10).unwrap();
    assert!(PortScanRequest::new(LOCALHOST, range, Duration::from_millis(100), 0).is_err());
}
