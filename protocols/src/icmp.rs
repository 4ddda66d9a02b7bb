use anyhow::{Context, ensure};
use pnet::packet::icmp::{
    self, IcmpCode, IcmpPacket, IcmpTypes, echo_reply::EchoReplyPacket,
    echo_request::MutableEchoRequestPacket,
};
use pnet::packet::icmpv6::{
    Icmpv6Code, Icmpv6Packet, Icmpv6Types, echo_reply::EchoReplyPacket as EchoReplyV6Packet,
    echo_request::MutableEchoRequestPacket as MutableEchoRequestV6Packet,
};

pub const ICMP_HDR_LEN: usize = 8;
const IPV4_MIN_HDR_LEN: usize = 20;
const IPV6_HDR_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcmpFamily {
    V4,
    V6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The destination answered the echo request.
    EchoReply,
    /// A router on the path dropped the probe because its TTL ran out.
    TimeExceeded,
    DestinationUnreachable,
}

/// A parsed ICMP message that refers to one of our echo requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpReply {
    pub kind: ReplyKind,
    pub identifier: u16,
    pub sequence: u16,
}

pub fn create_echo_request(
    family: IcmpFamily,
    identifier: u16,
    sequence: u16,
    payload: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = vec![0u8; ICMP_HDR_LEN + payload.len()];

    match family {
        IcmpFamily::V4 => {
            {
                let mut echo = MutableEchoRequestPacket::new(&mut buffer)
                    .context("creating icmp echo request")?;
                echo.set_icmp_type(IcmpTypes::EchoRequest);
                echo.set_icmp_code(IcmpCode(0));
                echo.set_identifier(identifier);
                echo.set_sequence_number(sequence);
                echo.set_payload(payload);
            }
            let checksum: u16 = {
                let packet = IcmpPacket::new(&buffer).context("reading back icmp packet")?;
                icmp::checksum(&packet)
            };
            buffer[2..4].copy_from_slice(&checksum.to_be_bytes());
        }
        IcmpFamily::V6 => {
            // The kernel fills in the ICMPv6 checksum, it needs the pseudo header.
            let mut echo = MutableEchoRequestV6Packet::new(&mut buffer)
                .context("creating icmpv6 echo request")?;
            echo.set_icmpv6_type(Icmpv6Types::EchoRequest);
            echo.set_icmpv6_code(Icmpv6Code(0));
            echo.set_identifier(identifier);
            echo.set_sequence_number(sequence);
            echo.set_payload(payload);
        }
    }

    Ok(buffer)
}

/// Parses a received datagram.
///
/// Raw IPv4 sockets deliver the IP header in front of the ICMP message, datagram
/// sockets and IPv6 sockets do not; both layouts are accepted. Returns an error
/// for messages that cannot be tied back to an echo request.
pub fn parse_reply(family: IcmpFamily, bytes: &[u8]) -> anyhow::Result<IcmpReply> {
    match family {
        IcmpFamily::V4 => parse_v4(strip_ipv4_header(bytes)?),
        IcmpFamily::V6 => parse_v6(bytes),
    }
}

fn parse_v4(bytes: &[u8]) -> anyhow::Result<IcmpReply> {
    let packet = IcmpPacket::new(bytes).context("truncated icmp packet")?;
    let kind: ReplyKind = match packet.get_icmp_type() {
        IcmpTypes::EchoReply => {
            let reply = EchoReplyPacket::new(bytes).context("truncated echo reply")?;
            return Ok(IcmpReply {
                kind: ReplyKind::EchoReply,
                identifier: reply.get_identifier(),
                sequence: reply.get_sequence_number(),
            });
        }
        IcmpTypes::TimeExceeded => ReplyKind::TimeExceeded,
        IcmpTypes::DestinationUnreachable => ReplyKind::DestinationUnreachable,
        other => anyhow::bail!("unexpected icmp type {}", other.0),
    };

    ensure!(bytes.len() > ICMP_HDR_LEN, "icmp error without quoted datagram");
    let quoted: &[u8] = strip_ipv4_header(&bytes[ICMP_HDR_LEN..])?;
    let (identifier, sequence) = quoted_echo_ids(quoted)?;
    ensure!(
        quoted[0] == IcmpTypes::EchoRequest.0,
        "quoted datagram is not an echo request"
    );

    Ok(IcmpReply {
        kind,
        identifier,
        sequence,
    })
}

fn parse_v6(bytes: &[u8]) -> anyhow::Result<IcmpReply> {
    let packet = Icmpv6Packet::new(bytes).context("truncated icmpv6 packet")?;
    let kind: ReplyKind = match packet.get_icmpv6_type() {
        Icmpv6Types::EchoReply => {
            let reply = EchoReplyV6Packet::new(bytes).context("truncated echo reply")?;
            return Ok(IcmpReply {
                kind: ReplyKind::EchoReply,
                identifier: reply.get_identifier(),
                sequence: reply.get_sequence_number(),
            });
        }
        Icmpv6Types::TimeExceeded => ReplyKind::TimeExceeded,
        Icmpv6Types::DestinationUnreachable => ReplyKind::DestinationUnreachable,
        other => anyhow::bail!("unexpected icmpv6 type {}", other.0),
    };

    ensure!(
        bytes.len() >= ICMP_HDR_LEN + IPV6_HDR_LEN + ICMP_HDR_LEN,
        "icmpv6 error quotes too little of the original datagram"
    );
    let quoted: &[u8] = &bytes[ICMP_HDR_LEN + IPV6_HDR_LEN..];
    ensure!(
        quoted[0] == Icmpv6Types::EchoRequest.0,
        "quoted datagram is not an echo request"
    );
    let (identifier, sequence) = quoted_echo_ids(quoted)?;

    Ok(IcmpReply {
        kind,
        identifier,
        sequence,
    })
}

fn quoted_echo_ids(quoted: &[u8]) -> anyhow::Result<(u16, u16)> {
    ensure!(quoted.len() >= ICMP_HDR_LEN, "quoted icmp header truncated");
    let identifier = u16::from_be_bytes([quoted[4], quoted[5]]);
    let sequence = u16::from_be_bytes([quoted[6], quoted[7]]);
    Ok((identifier, sequence))
}

/// Skips an IPv4 header if `bytes` starts with one.
fn strip_ipv4_header(bytes: &[u8]) -> anyhow::Result<&[u8]> {
    ensure!(!bytes.is_empty(), "empty datagram");
    if bytes[0] >> 4 != 4 {
        return Ok(bytes);
    }
    let header_len: usize = usize::from(bytes[0] & 0x0F) * 4;
    ensure!(
        header_len >= IPV4_MIN_HDR_LEN && bytes.len() >= header_len,
        "malformed ipv4 header"
    );
    Ok(&bytes[header_len..])
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
