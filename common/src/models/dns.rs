use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsAnswer {
    /// Name to addresses. Never empty.
    Forward(Vec<IpAddr>),
    /// Address to host name.
    Reverse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicIpOutcome {
    Resolved(String),
    Unresolved,
}

impl PublicIpOutcome {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            PublicIpOutcome::Resolved(addr) => Some(addr),
            PublicIpOutcome::Unresolved => None,
        }
    }
}

impl fmt::Display for PublicIpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicIpOutcome::Resolved(addr) => write!(f, "{addr}"),
            PublicIpOutcome::Unresolved => write!(f, "unable to retrieve public IP"),
        }
    }
}
