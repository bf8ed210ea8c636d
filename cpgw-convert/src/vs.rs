//! Vendor-specific (VS) gateway model, as produced by the upstream
//! configuration parser.
//!
//! This layer is assumed internally consistent: referential integrity inside
//! one device's graph (bonding members, subinterface parents, route nexthop
//! interfaces) is enforced upstream and treated as an invariant here.

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Default MTU for non-loopback interfaces.
pub const DEFAULT_INTERFACE_MTU: u32 = 1500;
/// Default MTU for loopback interfaces.
pub const DEFAULT_LOOPBACK_MTU: u32 = 65536;
/// Default speed of an ethernet interface with no configured link-speed, in bps.
pub const DEFAULT_ETH_SPEED: f64 = 1000e6;

/// Configured link speed and duplex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkSpeed {
    TenMHalf,
    TenMFull,
    HundredMHalf,
    HundredMFull,
    ThousandMFull,
}

impl LinkSpeed {
    /// Speed in bits per second.
    pub fn bps(self) -> f64 {
        match self {
            LinkSpeed::TenMHalf | LinkSpeed::TenMFull => 10e6,
            LinkSpeed::HundredMHalf | LinkSpeed::HundredMFull => 100e6,
            LinkSpeed::ThousandMFull => 1000e6,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One configured interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub address: Option<Ipv4Net>,
    /// Administrative state; on unless explicitly disabled.
    #[serde(default = "default_true")]
    pub state: bool,
    #[serde(default)]
    pub mtu: Option<u32>,
    #[serde(default)]
    pub link_speed: Option<LinkSpeed>,
    #[serde(default)]
    pub vlan_id: Option<u16>,
    /// Parent of a VLAN subinterface; guaranteed to exist upstream.
    #[serde(default)]
    pub parent_interface: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Interface {
            name: name.into(),
            address: None,
            state: true,
            mtu: None,
            link_speed: None,
            vlan_id: None,
            parent_interface: None,
            comments: None,
        }
    }

    /// Configured MTU, or the per-type default.
    pub fn mtu_effective(&self) -> u32 {
        self.mtu.unwrap_or(if self.name.starts_with("lo") {
            DEFAULT_LOOPBACK_MTU
        } else {
            DEFAULT_INTERFACE_MTU
        })
    }

    /// Configured speed in bps, or the ethernet default for `eth*` names.
    /// Other interfaces (loopbacks, aggregates) have no intrinsic speed.
    pub fn link_speed_effective(&self) -> Option<f64> {
        self.link_speed
            .map(LinkSpeed::bps)
            .or_else(|| self.name.starts_with("eth").then_some(DEFAULT_ETH_SPEED))
    }
}

/// Bonding (link aggregation) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    RoundRobin,
    ActiveBackup,
    Xor,
    Ieee8023ad,
}

/// LACP transmission rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LacpRate {
    Slow,
    Fast,
}

/// Slave selection hash policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmitHashPolicy {
    Layer2,
    Layer3And4,
}

/// A bonding group; the aggregate interface itself is a separate `bond<N>`
/// entry in the interface map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondingGroup {
    /// Group number, 0-1024.
    pub number: u16,
    /// Member interface names; a member belongs to at most one group.
    #[serde(default)]
    pub interfaces: BTreeSet<String>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub lacp_rate: Option<LacpRate>,
    #[serde(default)]
    pub xmit_hash_policy: Option<XmitHashPolicy>,
}

impl BondingGroup {
    pub const DEFAULT_MODE: Mode = Mode::RoundRobin;

    pub fn new(number: u16) -> Self {
        BondingGroup {
            number,
            interfaces: BTreeSet::new(),
            mode: None,
            lacp_rate: None,
            xmit_hash_policy: None,
        }
    }

    pub fn mode_effective(&self) -> Mode {
        self.mode.unwrap_or(Self::DEFAULT_MODE)
    }
}

/// Name of the aggregate interface for a bonding group number.
pub fn bond_interface_name(number: u16) -> String {
    format!("bond{number}")
}

/// Bonding group number encoded in an aggregate interface name, if any.
/// Subinterface names like `bond2.2` do not count.
pub fn bonding_group_number(name: &str) -> Option<u16> {
    let digits = name.strip_prefix("bond")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Target of one static-route nexthop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NexthopTarget {
    /// Forward toward a gateway address.
    Address(Ipv4Addr),
    /// Forward out a named interface; guaranteed to exist upstream.
    Logical(String),
    /// Silently drop.
    Blackhole,
    /// Drop with ICMP unreachable.
    Reject,
}

/// One nexthop of a static route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nexthop {
    /// Preference 1-8; an unset priority is preferred over any explicit one.
    #[serde(default)]
    pub priority: Option<u8>,
    pub target: NexthopTarget,
}

/// One configured static route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub destination: Ipv4Net,
    #[serde(default)]
    pub comment: Option<String>,
    pub nexthops: BTreeMap<NexthopTarget, Nexthop>,
}

/// One device's complete VS snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub hostname: String,
    pub interfaces: BTreeMap<String, Interface>,
    /// Bonding group number to group; a number maps to at most one group.
    #[serde(default)]
    pub bonding_groups: BTreeMap<u16, BondingGroup>,
    #[serde(default)]
    pub static_routes: BTreeMap<Ipv4Net, StaticRoute>,
    /// Vendor format tag, e.g. "check_point_gateway".
    pub format: String,
}

impl GatewayConfig {
    pub fn new(hostname: impl Into<String>, format: impl Into<String>) -> Self {
        GatewayConfig {
            hostname: hostname.into(),
            interfaces: BTreeMap::new(),
            bonding_groups: BTreeMap::new(),
            static_routes: BTreeMap::new(),
            format: format.into(),
        }
    }
}
