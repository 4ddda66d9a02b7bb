//! ICMP echo transport.
//!
//! One socket is opened per echo, used once and closed before the call
//! returns. A raw socket is preferred because it also receives the
//! time-exceeded messages traceroute depends on; without the privileges for it
//! the unprivileged datagram flavour is used, which only sees echo replies.

use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};

use netdiag_common::{
    debug,
    error::{DiagError, DiagResult},
};
use netdiag_protocols::icmp::{self, IcmpFamily, IcmpReply, ReplyKind};

const ECHO_PAYLOAD: &[u8; 32] = b"netdiag-echo-probe-0123456789abc";
const RECV_BUFFER_SIZE: usize = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoOutcome {
    /// The target itself answered.
    Reply { from: IpAddr, rtt: Duration },
    /// A router on the path reported that the TTL ran out.
    TimeExceeded { from: IpAddr, rtt: Duration },
    Unreachable { from: IpAddr, rtt: Duration },
    NoReply,
}

#[async_trait]
pub trait EchoTransport: Send + Sync {
    /// Sends one echo request, optionally limited to `ttl` hops, and waits up
    /// to `limit` for a matching answer.
    ///
    /// `Err` means the probe could not be sent at all; silence is `NoReply`.
    async fn echo(&self, target: IpAddr, ttl: Option<u8>, limit: Duration)
    -> DiagResult<EchoOutcome>;
}

#[derive(Debug)]
pub struct IcmpTransport {
    identifier: u16,
    sequence: AtomicU16,
}

impl Default for IcmpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl IcmpTransport {
    pub fn new() -> Self {
        Self {
            identifier: rand::random(),
            sequence: AtomicU16::new(0),
        }
    }

    fn next_sequence(&self) -> u16 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl EchoTransport for IcmpTransport {
    async fn echo(
        &self,
        target: IpAddr,
        ttl: Option<u8>,
        limit: Duration,
    ) -> DiagResult<EchoOutcome> {
        let probe = EchoProbe {
            target,
            ttl,
            limit,
            identifier: self.identifier,
            sequence: self.next_sequence(),
        };
        tokio::task::spawn_blocking(move || probe.run())
            .await
            .map_err(|e| DiagError::Transport(io::Error::other(e)))?
    }
}

struct EchoProbe {
    target: IpAddr,
    ttl: Option<u8>,
    limit: Duration,
    identifier: u16,
    sequence: u16,
}

impl EchoProbe {
    fn family(&self) -> IcmpFamily {
        match self.target {
            IpAddr::V4(_) => IcmpFamily::V4,
            IpAddr::V6(_) => IcmpFamily::V6,
        }
    }

    fn run(self) -> DiagResult<EchoOutcome> {
        let (socket, is_raw) = open_socket(self.family(), self.ttl)?;
        let packet: Vec<u8> =
            icmp::create_echo_request(self.family(), self.identifier, self.sequence, ECHO_PAYLOAD)
                .map_err(|e| DiagError::Transport(io::Error::other(e)))?;

        let started: Instant = Instant::now();
        socket.send_to(&packet, SocketAddr::new(self.target, 0))?;

        let deadline: Instant = started + self.limit;
        let mut buffer = [0u8; RECV_BUFFER_SIZE];

        loop {
            let remaining: Duration = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(EchoOutcome::NoReply);
            }
            socket.set_read_timeout(Some(remaining))?;

            let (len, from) = match socket.recv_from(&mut buffer) {
                Ok(received) => received,
                Err(e) if is_timeout(&e) => return Ok(EchoOutcome::NoReply),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            let reply: IcmpReply = match icmp::parse_reply(self.family(), &buffer[..len]) {
                Ok(reply) => reply,
                Err(e) => {
                    debug!("ignoring icmp message from {}: {e}", from.ip());
                    continue;
                }
            };

            if !self.matches(&reply, is_raw) {
                continue;
            }

            let rtt: Duration = started.elapsed();
            let from: IpAddr = from.ip();
            return Ok(match reply.kind {
                ReplyKind::EchoReply => EchoOutcome::Reply { from, rtt },
                ReplyKind::TimeExceeded => EchoOutcome::TimeExceeded { from, rtt },
                ReplyKind::DestinationUnreachable => EchoOutcome::Unreachable { from, rtt },
            });
        }
    }

    /// Raw sockets see every ICMP message on the host. Datagram sockets are
    /// already demultiplexed by the kernel, which also rewrites the identifier.
    fn matches(&self, reply: &IcmpReply, is_raw: bool) -> bool {
        let identifier_ok: bool = !is_raw || reply.identifier == self.identifier;
        identifier_ok && reply.sequence == self.sequence
    }
}

fn open_socket(family: IcmpFamily, ttl: Option<u8>) -> DiagResult<(UdpSocket, bool)> {
    let (domain, protocol) = match family {
        IcmpFamily::V4 => (Domain::IPV4, Protocol::ICMPV4),
        IcmpFamily::V6 => (Domain::IPV6, Protocol::ICMPV6),
    };

    let (socket, is_raw) = match Socket::new(domain, Type::RAW, Some(protocol)) {
        Ok(socket) => (socket, true),
        Err(raw_err) => {
            debug!("raw icmp socket unavailable ({raw_err}), falling back to datagram socket");
            let socket = Socket::new(domain, Type::DGRAM, Some(protocol))?;
            (socket, false)
        }
    };

    if let Some(ttl) = ttl {
        match family {
            IcmpFamily::V4 => socket.set_ttl(u32::from(ttl))?,
            IcmpFamily::V6 => socket.set_unicast_hops_v6(u32::from(ttl))?,
        }
    }

    // Only the datagram calls of UdpSocket are used, they work on any socket type.
    Ok((UdpSocket::from(socket), is_raw))
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}
