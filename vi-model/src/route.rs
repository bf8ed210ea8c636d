use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Forwarding target of a static route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NextHop {
    /// Forward toward a gateway address.
    Ip(Ipv4Addr),
    /// Forward out a named interface.
    Interface(String),
    /// Drop matching traffic.
    Discard,
}

/// A non-recursive vendor-independent static route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticRoute {
    pub network: Ipv4Net,
    pub next_hop: NextHop,
    /// Preference among overlapping routes; lower wins.
    pub administrative_cost: u8,
    pub recursive: bool,
}
