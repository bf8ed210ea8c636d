use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// IP protocol of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IpProtocol {
    Tcp,
    Udp,
    Icmp,
}

/// A single packet flow, as seen by filters and transformations.
///
/// Deliberately minimal: enough header fields for first-match-wins filter
/// evaluation and source rewrites, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub protocol: IpProtocol,
    pub src_port: u16,
    pub dst_port: u16,
}

impl Flow {
    /// Convenience constructor for a TCP flow with fixed ports.
    pub fn tcp(src_ip: Ipv4Addr, dst_ip: Ipv4Addr) -> Self {
        Flow {
            src_ip,
            dst_ip,
            protocol: IpProtocol::Tcp,
            src_port: 1,
            dst_port: 1,
        }
    }
}
