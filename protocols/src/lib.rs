//! Wire codecs for the probes sent by `netdiag-core`.
//!
//! Packets are built and parsed with `pnet`'s packet types; sockets are not
//! handled here.

pub mod icmp;
