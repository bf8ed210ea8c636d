//! Management-plane policy model, as produced by the upstream export
//! deserializer.
//!
//! Policy objects are heterogeneous; they are modeled as one closed variant
//! set ([`ManagementObject`]) dispatched by exhaustive pattern match per
//! conversion target. Unknown kinds are a distinguished catch-all, never a
//! cast failure.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Opaque stable object identifier, unique within one conversion's registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(String);

impl Uid {
    pub fn of(value: impl Into<String>) -> Self {
        Uid(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Display for Uid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concrete address set carried by an address-space object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressSpaceBody {
    Host { address: Ipv4Addr },
    Network { prefix: Ipv4Net },
    Range { start: Ipv4Addr, end: Ipv4Addr },
    /// Ordered member references, resolved through the registry.
    Group { members: Vec<Uid> },
    /// Matches all addresses.
    Any,
}

impl AddressSpaceBody {
    /// Object kind label used in IP-space metadata.
    pub fn type_label(&self) -> &'static str {
        match self {
            AddressSpaceBody::Host { .. } => "host",
            AddressSpaceBody::Network { .. } => "network",
            AddressSpaceBody::Range { .. } => "address-range",
            AddressSpaceBody::Group { .. } => "group",
            AddressSpaceBody::Any => "any",
        }
    }
}

/// A named address-space object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSpaceObject {
    pub uid: Uid,
    pub name: String,
    pub body: AddressSpaceBody,
}

/// A rulebase action object; the name ("Accept", "Drop", ...) carries the
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulebaseAction {
    pub uid: Uid,
    pub name: String,
}

/// Marker object meaning "all policy installation targets".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTargets {
    pub uid: Uid,
}

/// Marker object meaning "keep the original field" in a NAT rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Original {
    pub uid: Uid,
}

/// Role of a gateway-or-server record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayVariant {
    SimpleGateway,
    ClusterMember,
    Cluster {
        /// Member gateway names; position is the member's priority index.
        member_names: Vec<String>,
    },
}

/// Policy assignment of a gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPolicy {
    #[serde(default)]
    pub access_policy_name: Option<String>,
}

/// An interface declared on a management gateway or cluster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MgmtInterface {
    pub name: String,
    #[serde(default)]
    pub ipv4_address: Option<Ipv4Addr>,
    #[serde(default)]
    pub mask_length: Option<u8>,
}

/// A gateway or server record from the management plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrServer {
    pub uid: Uid,
    pub name: String,
    /// Identity address used to match a device to its management record.
    #[serde(default)]
    pub ipv4_address: Option<Ipv4Addr>,
    #[serde(default)]
    pub interfaces: Vec<MgmtInterface>,
    #[serde(default)]
    pub policy: GatewayPolicy,
    pub variant: GatewayVariant,
}

/// An object of a type the conversion does not model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownObject {
    pub uid: Uid,
    pub name: String,
    pub type_name: String,
}

/// Closed set of management object kinds, dispatched by pattern match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagementObject {
    AddressSpace(AddressSpaceObject),
    RulebaseAction(RulebaseAction),
    PolicyTargets(PolicyTargets),
    Original(Original),
    GatewayOrServer(GatewayOrServer),
    Unknown(UnknownObject),
}

impl ManagementObject {
    pub fn uid(&self) -> &Uid {
        match self {
            ManagementObject::AddressSpace(o) => &o.uid,
            ManagementObject::RulebaseAction(o) => &o.uid,
            ManagementObject::PolicyTargets(o) => &o.uid,
            ManagementObject::Original(o) => &o.uid,
            ManagementObject::GatewayOrServer(o) => &o.uid,
            ManagementObject::Unknown(o) => &o.uid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ManagementObject::AddressSpace(o) => &o.name,
            ManagementObject::RulebaseAction(o) => &o.name,
            ManagementObject::PolicyTargets(_) => "Policy Targets",
            ManagementObject::Original(_) => "Original",
            ManagementObject::GatewayOrServer(o) => &o.name,
            ManagementObject::Unknown(o) => &o.name,
        }
    }
}

/// One ordered firewall rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub uid: Uid,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub action: Uid,
    pub sources: Vec<Uid>,
    pub destinations: Vec<Uid>,
    pub services: Vec<Uid>,
}

/// A named group of rules inside a layer, evaluated inline in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSection {
    pub uid: Uid,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub rules: Vec<AccessRule>,
}

/// One entry of an access layer's rulebase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessRuleOrSection {
    Rule(AccessRule),
    Section(AccessSection),
}

/// An ordered, first-match-wins firewall rulebase with its local object
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLayer {
    pub uid: Uid,
    pub name: String,
    #[serde(default)]
    pub objects: BTreeMap<Uid, ManagementObject>,
    pub rulebase: Vec<AccessRuleOrSection>,
}

/// NAT translation method; only HIDE is convertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatMethod {
    Hide,
    Static,
}

/// One ordered NAT rule; rulebase order is rewrite precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRule {
    pub uid: Uid,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub method: NatMethod,
    pub original_source: Uid,
    pub original_destination: Uid,
    pub original_service: Uid,
    pub translated_source: Uid,
    pub translated_destination: Uid,
    pub translated_service: Uid,
    /// Gateways this rule installs on; a policy-targets marker means all.
    pub install_on: Vec<Uid>,
}

/// The NAT rulebase of a package with its local object dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRulebase {
    pub uid: Uid,
    #[serde(default)]
    pub objects: BTreeMap<Uid, ManagementObject>,
    pub rules: Vec<NatRule>,
}

/// Identity of a policy package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub uid: Uid,
    pub name: String,
}

/// A policy package with its nested rulebases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementPackage {
    pub package: Package,
    #[serde(default)]
    pub access_layers: Vec<AccessLayer>,
    #[serde(default)]
    pub nat_rulebase: Option<NatRulebase>,
}

/// One management domain: gateways, packages, and domain-wide objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementDomain {
    pub name: String,
    #[serde(default)]
    pub gateways_and_servers: BTreeMap<Uid, GatewayOrServer>,
    #[serde(default)]
    pub packages: BTreeMap<Uid, ManagementPackage>,
    #[serde(default)]
    pub objects: Vec<ManagementObject>,
}

/// One management server and its domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementServer {
    pub name: String,
    pub domains: BTreeMap<String, ManagementDomain>,
}

/// The complete management-plane snapshot. All maps are ordered so that
/// "first in iteration order" is a defined, stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementConfig {
    pub servers: BTreeMap<String, ManagementServer>,
}

fn default_true() -> bool {
    true
}
