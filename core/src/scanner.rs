//! Bounded-concurrency TCP connect scanner.
//!
//! Every port of the request gets exactly one connect attempt. A semaphore
//! permit is taken *before* a worker task is spawned, so no more than
//! `max_concurrency` workers ever exist at once. Workers hand `(port, open)`
//! back through their join handle and only the collector in [`PortScanner::scan`]
//! touches the result set.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use netdiag_common::{
    debug, error,
    models::{PortScanRequest, PortScanResult},
};

use crate::network::{Connector, TcpConnector};

/// Called with the number of settled attempts after each one settles.
pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

pub struct PortScanner {
    connector: Arc<dyn Connector>,
    on_port_settled: Option<ProgressCallback>,
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new(Arc::new(TcpConnector))
    }
}

impl PortScanner {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            on_port_settled: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_port_settled = Some(callback);
        self
    }

    /// Scans every port of `request` and returns once all attempts settled.
    pub async fn scan(&self, request: &PortScanRequest) -> PortScanResult {
        let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(request.max_concurrency()));
        let mut workers: JoinSet<(u16, bool)> = JoinSet::new();
        let mut collector = Collector::new(self.on_port_settled.as_ref());

        debug!(
            "scanning {} ports on {} with {} workers",
            request.port_count(),
            request.host(),
            request.max_concurrency()
        );

        for port in request.ports() {
            // Never closed, so acquiring cannot fail.
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                error!("scan semaphore closed unexpectedly");
                break;
            };

            let connector: Arc<dyn Connector> = self.connector.clone();
            let addr: SocketAddr = SocketAddr::new(request.host(), port);
            let limit = request.connect_timeout();

            workers.spawn(async move {
                let open: bool = connector.connect(addr, limit).await;
                drop(permit);
                (port, open)
            });

            while let Some(settled) = workers.try_join_next() {
                collector.settle(settled);
            }
        }

        while let Some(settled) = workers.join_next().await {
            collector.settle(settled);
        }

        collector.finish()
    }
}

struct Collector<'a> {
    open_ports: BTreeSet<u16>,
    attempted: usize,
    on_port_settled: Option<&'a ProgressCallback>,
}

impl<'a> Collector<'a> {
    fn new(on_port_settled: Option<&'a ProgressCallback>) -> Self {
        Self {
            open_ports: BTreeSet::new(),
            attempted: 0,
            on_port_settled,
        }
    }

    fn settle(&mut self, settled: Result<(u16, bool), JoinError>) {
        self.attempted += 1;
        match settled {
            Ok((port, true)) => {
                self.open_ports.insert(port);
            }
            Ok((_, false)) => {}
            // A worker that panicked counts as a closed port.
            Err(e) => error!("port scan worker failed: {e}"),
        }
        if let Some(callback) = self.on_port_settled {
            callback(self.attempted);
        }
    }

    fn finish(self) -> PortScanResult {
        PortScanResult {
            open_ports: self.open_ports,
            attempted: self.attempted,
        }
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
