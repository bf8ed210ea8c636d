//! Vendor-independent network device model primitives used by conversion engines.

pub mod acl;
pub mod config;
pub mod flow;
pub mod interface;
pub mod ip_space;
pub mod route;
pub mod transformation;

pub use acl::{AclLine, IpAccessList, LineAction, MatchExpr};
pub use config::{ViConfiguration, Vrf};
pub use flow::{Flow, IpProtocol};
pub use interface::{
    Dependency, DependencyType, FirewallSessionInfo, Interface, InterfaceType, SessionAction,
    VrrpGroup, VRRP_MAX_PRIORITY,
};
pub use ip_space::{IpSpace, IpSpaceMetadata};
pub use route::{NextHop, StaticRoute};
pub use transformation::{Transformation, TransformationStep};
