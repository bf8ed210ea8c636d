//! Interface topology construction.
//!
//! Each VS interface converts through one pure function into a
//! fully-specified VI interface; aggregate bandwidth is resolved by a later
//! pass once every member exists.

use std::collections::BTreeMap;

use ipnet::Ipv4Net;
use vi_model::{
    Dependency, DependencyType, FirewallSessionInfo, Interface, InterfaceType, SessionAction,
    Transformation, VrrpGroup, VRRP_MAX_PRIORITY,
};

use crate::cluster::ClusterAttachment;
use crate::diag::Diagnostics;
use crate::vs;

/// Everything one interface conversion reads besides the interface itself.
pub struct TopologyContext<'a> {
    pub interfaces: &'a BTreeMap<String, vs::Interface>,
    pub bonding_groups: &'a BTreeMap<u16, vs::BondingGroup>,
    pub cluster: Option<&'a ClusterAttachment>,
    /// Composite filter name, when an access policy compiled.
    pub incoming_filter: Option<String>,
    /// Merged NAT chain, installed uniformly on every interface.
    pub transformation: Option<Transformation>,
}

/// Interface role from vendor naming conventions.
pub fn interface_type(name: &str) -> InterfaceType {
    let is_sub = name.contains('.');
    if name.starts_with("eth") {
        if is_sub {
            InterfaceType::Logical
        } else {
            InterfaceType::Physical
        }
    } else if name.starts_with("lo") {
        InterfaceType::Loopback
    } else if name.starts_with("bond") {
        if is_sub {
            InterfaceType::AggregateChild
        } else {
            InterfaceType::Aggregated
        }
    } else {
        InterfaceType::Unknown
    }
}

/// The bonding group a named interface is a member of, scanning groups in
/// number order.
fn member_group<'a>(
    bonding_groups: &'a BTreeMap<u16, vs::BondingGroup>,
    name: &str,
) -> Option<&'a vs::BondingGroup> {
    bonding_groups
        .values()
        .find(|group| group.interfaces.contains(name))
}

/// Convert one VS interface into its VI counterpart.
pub fn convert_interface(
    iface: &vs::Interface,
    ctx: &TopologyContext<'_>,
    diags: &mut Diagnostics,
) -> Interface {
    let name = &iface.name;
    let mut out = Interface::new(name.clone(), interface_type(name));

    if let Some(group) = member_group(ctx.bonding_groups, name) {
        // Address and admin state belong to the aggregate; the member link
        // stays up and inherits the aggregate's MTU.
        let bond_name = vs::bond_interface_name(group.number);
        let bond = ctx
            .interfaces
            .get(&bond_name)
            .expect("aggregate interface exists for bonding group");
        out.mtu = bond.mtu_effective();
        out.channel_group = Some(bond_name);
    } else {
        out.address = iface.address;
        out.active = iface.state;
        out.mtu = iface.mtu_effective();
    }

    match out.iface_type {
        InterfaceType::Physical | InterfaceType::Logical => {
            let mut speed = iface.link_speed_effective();
            if let Some(parent_name) = &iface.parent_interface {
                let parent = ctx
                    .interfaces
                    .get(parent_name)
                    .expect("subinterface parent exists");
                if let Some(configured) = parent.link_speed {
                    speed = Some(configured.bps());
                }
            }
            out.speed = speed;
            out.bandwidth = speed;
        }
        // Aggregates and their children are resolved after all members
        // are built; loopbacks have no intrinsic speed.
        _ => {}
    }

    if let Some(parent_name) = &iface.parent_interface {
        out.dependencies.push(Dependency {
            name: parent_name.clone(),
            dep_type: DependencyType::Bind,
        });
    }
    out.encapsulation_vlan = iface.vlan_id;

    if let Some(group) = vs::bonding_group_number(name).and_then(|n| ctx.bonding_groups.get(&n)) {
        out.channel_group_members = group.interfaces.clone();
        out.dependencies.extend(group.interfaces.iter().map(|member| Dependency {
            name: member.clone(),
            dep_type: DependencyType::Aggregate,
        }));
        if group.mode_effective() == vs::Mode::ActiveBackup {
            diags.push(
                "unsupported_bonding_mode",
                format!(
                    "Bonding group mode active-backup is not supported. Deactivating interface {name}."
                ),
            );
            out.active = false;
        }
    }

    out.incoming_filter = ctx.incoming_filter.clone();
    out.incoming_transformation = ctx.transformation.clone();
    out.firewall_session = Some(FirewallSessionInfo {
        action: SessionAction::PostNatFibLookup,
        interfaces: vec![name.clone()],
    });

    if let Some(cluster) = ctx.cluster {
        attach_vrrp(&mut out, cluster);
    }
    out
}

/// Attach the cluster's virtual address as VRRP group 0 when the cluster
/// declares an addressed interface of the same name.
fn attach_vrrp(iface: &mut Interface, cluster: &ClusterAttachment) {
    let Some(cluster_iface) = cluster.interfaces.get(&iface.name) else {
        return;
    };
    let Some(address) = cluster_iface.ipv4_address else {
        return;
    };
    let mask = cluster_iface
        .mask_length
        .expect("cluster interface carries a mask");
    let virtual_address =
        Ipv4Net::new(address, mask).expect("cluster interface mask is a valid prefix length");
    let index = u8::try_from(cluster.member_index).expect("member index fits VRRP priority");
    iface.vrrp_groups.insert(
        0,
        VrrpGroup {
            virtual_address,
            priority: VRRP_MAX_PRIORITY - index,
            preempt: true,
        },
    );
}

/// Resolve aggregate bandwidth once all interfaces exist: an aggregate's
/// bandwidth is the sum of its members' (0 when it has none), and an
/// aggregate child's is its parent's resolved bandwidth.
pub fn resolve_aggregate_bandwidth(interfaces: &mut BTreeMap<String, Interface>) {
    let aggregates: Vec<String> = interfaces
        .values()
        .filter(|iface| iface.iface_type == InterfaceType::Aggregated)
        .map(|iface| iface.name.clone())
        .collect();
    for name in aggregates {
        let members = interfaces
            .get(&name)
            .map(|iface| iface.channel_group_members.clone())
            .unwrap_or_default();
        let total: f64 = members
            .iter()
            .filter_map(|member| interfaces.get(member).and_then(|iface| iface.bandwidth))
            .sum();
        if let Some(aggregate) = interfaces.get_mut(&name) {
            aggregate.bandwidth = Some(total);
        }
    }

    let children: Vec<(String, String)> = interfaces
        .values()
        .filter(|iface| iface.iface_type == InterfaceType::AggregateChild)
        .filter_map(|iface| {
            iface
                .dependencies
                .iter()
                .find(|dep| dep.dep_type == DependencyType::Bind)
                .map(|dep| (iface.name.clone(), dep.name.clone()))
        })
        .collect();
    for (child, parent) in children {
        let bandwidth = interfaces.get(&parent).and_then(|iface| iface.bandwidth);
        if let Some(child) = interfaces.get_mut(&child) {
            child.bandwidth = bandwidth;
        }
    }
}
