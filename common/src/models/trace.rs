use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HopStatus {
    /// Something answered: either a router (time exceeded) or the destination.
    Reply,
    TimedOut,
    /// The probe could not be sent. Always the last hop of a trace.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracerouteHop {
    pub ttl: u8,
    pub address: Option<IpAddr>,
    pub rtt: Option<Duration>,
    pub reached_destination: bool,
    pub status: HopStatus,
}

impl TracerouteHop {
    pub fn timed_out(ttl: u8) -> Self {
        Self {
            ttl,
            address: None,
            rtt: None,
            reached_destination: false,
            status: HopStatus::TimedOut,
        }
    }

    pub fn error(ttl: u8, reason: impl Into<String>) -> Self {
        Self {
            ttl,
            address: None,
            rtt: None,
            reached_destination: false,
            status: HopStatus::Error(reason.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, HopStatus::Error(_))
    }
}
