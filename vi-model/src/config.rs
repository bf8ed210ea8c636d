use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::acl::IpAccessList;
use crate::interface::Interface;
use crate::ip_space::{IpSpace, IpSpaceMetadata};
use crate::route::StaticRoute;

/// A routing instance owning a set of static routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vrf {
    pub name: String,
    pub static_routes: BTreeSet<StaticRoute>,
}

impl Vrf {
    pub fn new(name: impl Into<String>) -> Self {
        Vrf {
            name: name.into(),
            static_routes: BTreeSet::new(),
        }
    }
}

/// One complete vendor-independent device configuration.
///
/// Built once per conversion and handed downstream as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViConfiguration {
    pub hostname: String,
    /// Vendor format tag of the source configuration.
    pub vendor: String,
    pub interfaces: BTreeMap<String, Interface>,
    pub vrfs: BTreeMap<String, Vrf>,
    pub ip_access_lists: BTreeMap<String, IpAccessList>,
    pub ip_spaces: BTreeMap<String, IpSpace>,
    pub ip_space_metadata: BTreeMap<String, IpSpaceMetadata>,
}

impl ViConfiguration {
    pub fn new(hostname: impl Into<String>, vendor: impl Into<String>) -> Self {
        ViConfiguration {
            hostname: hostname.into(),
            vendor: vendor.into(),
            interfaces: BTreeMap::new(),
            vrfs: BTreeMap::new(),
            ip_access_lists: BTreeMap::new(),
            ip_spaces: BTreeMap::new(),
            ip_space_metadata: BTreeMap::new(),
        }
    }

    /// Serialize for downstream consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
