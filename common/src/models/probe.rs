use std::time::Duration;

use crate::error::ErrorKind;

/// Outcome of one echo probe against a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub target: String,
    pub success: bool,
    pub latency: Option<Duration>,
    pub error: Option<ErrorKind>,
}

impl ProbeResult {
    pub fn reachable(target: impl Into<String>, latency: Duration) -> Self {
        Self {
            target: target.into(),
            success: true,
            latency: Some(latency),
            error: None,
        }
    }

    /// A negative outcome. An unanswered probe carries `ErrorKind::Timeout`.
    pub fn unreachable(target: impl Into<String>, error: Option<ErrorKind>) -> Self {
        Self {
            target: target.into(),
            success: false,
            latency: None,
            error,
        }
    }
}

/// Aggregate of several sequential probes against one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingSummary {
    pub target: String,
    pub sent: usize,
    pub received: usize,
    pub min: Option<Duration>,
    pub avg: Option<Duration>,
    pub max: Option<Duration>,
}

impl PingSummary {
    pub fn from_results(target: impl Into<String>, results: &[ProbeResult]) -> Self {
        let latencies: Vec<Duration> = results.iter().filter_map(|r| r.latency).collect();
        let avg: Option<Duration> = match latencies.len() {
            0 => None,
            n => Some(latencies.iter().sum::<Duration>() / n as u32),
        };
        Self {
            target: target.into(),
            sent: results.len(),
            received: results.iter().filter(|r| r.success).count(),
            min: latencies.iter().min().copied(),
            avg,
            max: latencies.iter().max().copied(),
        }
    }

    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        (self.sent - self.received) as f64 * 100.0 / self.sent as f64
    }
}
