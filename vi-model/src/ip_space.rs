use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// A set of IPv4 addresses.
///
/// `Reference` points at another named space in the owning configuration;
/// membership tests resolve references through the provided environment and
/// are cycle-safe (a reference cycle contributes nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpSpace {
    /// A single address.
    Host(Ipv4Addr),
    /// All addresses covered by a prefix.
    Prefix(Ipv4Net),
    /// An inclusive address range.
    Range(Ipv4Addr, Ipv4Addr),
    /// Union of member spaces.
    Union(Vec<IpSpace>),
    /// A named space defined elsewhere in the configuration.
    Reference(String),
    /// The empty set.
    Empty,
    /// All addresses.
    Universe,
}

impl IpSpace {
    /// Whether `ip` is a member of this space, resolving named references
    /// through `named`.
    pub fn contains(&self, ip: Ipv4Addr, named: &BTreeMap<String, IpSpace>) -> bool {
        let mut visiting = BTreeSet::new();
        self.contains_inner(ip, named, &mut visiting)
    }

    fn contains_inner(
        &self,
        ip: Ipv4Addr,
        named: &BTreeMap<String, IpSpace>,
        visiting: &mut BTreeSet<String>,
    ) -> bool {
        match self {
            IpSpace::Host(addr) => *addr == ip,
            IpSpace::Prefix(net) => net.contains(&ip),
            IpSpace::Range(start, end) => *start <= ip && ip <= *end,
            IpSpace::Union(members) => members
                .iter()
                .any(|m| m.contains_inner(ip, named, visiting)),
            IpSpace::Reference(name) => {
                if !visiting.insert(name.clone()) {
                    return false;
                }
                let result = named
                    .get(name)
                    .is_some_and(|space| space.contains_inner(ip, named, visiting));
                visiting.remove(name);
                result
            }
            IpSpace::Empty => false,
            IpSpace::Universe => true,
        }
    }
}

/// Provenance of a named IP space, surfaced to downstream analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSpaceMetadata {
    /// Display name of the object that produced the space.
    pub source_name: String,
    /// Kind of the producing object, e.g. "network" or "gateway-or-server".
    pub source_type: String,
}
