use std::collections::{BTreeMap, BTreeSet};

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::transformation::Transformation;

/// Highest VRRP priority; the owner of the virtual address.
pub const VRRP_MAX_PRIORITY: u8 = 255;

/// Interface role, derived from vendor naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceType {
    Physical,
    Logical,
    Loopback,
    Aggregated,
    AggregateChild,
    Unknown,
}

/// Kind of edge between two interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyType {
    /// Subinterface depends on its parent's existence and state.
    Bind,
    /// Aggregate depends on a member link.
    Aggregate,
}

/// A dependency edge from this interface to another.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub dep_type: DependencyType,
}

/// One VRRP group on an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrrpGroup {
    pub virtual_address: Ipv4Net,
    pub priority: u8,
    pub preempt: bool,
}

/// How sessions set up through an interface are routed on return traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    PreNatFibLookup,
    PostNatFibLookup,
}

/// Session tracking metadata attached to an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallSessionInfo {
    pub action: SessionAction,
    pub interfaces: Vec<String>,
}

/// A fully-specified vendor-independent interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub iface_type: InterfaceType,
    pub active: bool,
    pub address: Option<Ipv4Net>,
    pub mtu: u32,
    /// Link speed in bits per second.
    pub speed: Option<f64>,
    /// Usable bandwidth in bits per second.
    pub bandwidth: Option<f64>,
    pub encapsulation_vlan: Option<u16>,
    /// Aggregate this interface is a member of.
    pub channel_group: Option<String>,
    /// Members, when this interface is an aggregate.
    pub channel_group_members: BTreeSet<String>,
    pub dependencies: Vec<Dependency>,
    /// Name of the incoming packet filter.
    pub incoming_filter: Option<String>,
    pub incoming_transformation: Option<Transformation>,
    pub vrrp_groups: BTreeMap<u8, VrrpGroup>,
    pub firewall_session: Option<FirewallSessionInfo>,
}

impl Interface {
    /// A bare interface: up, no address, MTU unset to 0 until the builder
    /// assigns one.
    pub fn new(name: impl Into<String>, iface_type: InterfaceType) -> Self {
        Interface {
            name: name.into(),
            iface_type,
            active: true,
            address: None,
            mtu: 0,
            speed: None,
            bandwidth: None,
            encapsulation_vlan: None,
            channel_group: None,
            channel_group_members: BTreeSet::new(),
            dependencies: Vec::new(),
            incoming_filter: None,
            incoming_transformation: None,
            vrrp_groups: BTreeMap::new(),
            firewall_session: None,
        }
    }
}
