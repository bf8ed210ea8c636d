use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use cpgw_convert::access_rules::INTERFACE_ACL_NAME;
use cpgw_convert::convert::{convert_gateway, VRF_NAME};
use cpgw_convert::diag::Diagnostics;
use cpgw_convert::mgmt::{
    AccessLayer, AccessRule, AccessRuleOrSection, AddressSpaceBody, AddressSpaceObject,
    GatewayOrServer, GatewayPolicy, GatewayVariant, ManagementConfig, ManagementDomain,
    ManagementObject, ManagementPackage, ManagementServer, MgmtInterface, NatMethod, NatRule,
    NatRulebase, Package, PolicyTargets, RulebaseAction, Uid,
};
use cpgw_convert::vs;
use pretty_assertions::assert_eq;
use vi_model::{Flow, LineAction, NextHop, VRRP_MAX_PRIORITY};

fn ip(s: &str) -> Ipv4Addr {
    s.parse().expect("ip")
}

fn net(s: &str) -> ipnet::Ipv4Net {
    s.parse().expect("net")
}

fn device_with_eth0() -> vs::GatewayConfig {
    let mut gateway = vs::GatewayConfig::new("gw1", "check_point_gateway");
    let mut eth0 = vs::Interface::new("eth0");
    eth0.address = Some(net("10.0.0.1/24"));
    gateway.interfaces.insert("eth0".to_string(), eth0);
    gateway
}

fn single_domain(domain: ManagementDomain) -> ManagementConfig {
    ManagementConfig {
        servers: BTreeMap::from([(
            "s1".to_string(),
            ManagementServer {
                name: "s1".to_string(),
                domains: BTreeMap::from([(domain.name.clone(), domain)]),
            },
        )]),
    }
}

fn space(uid: &str, name: &str, body: AddressSpaceBody) -> ManagementObject {
    ManagementObject::AddressSpace(AddressSpaceObject {
        uid: Uid::of(uid),
        name: name.to_string(),
        body,
    })
}

fn action(uid: &str, name: &str) -> ManagementObject {
    ManagementObject::RulebaseAction(RulebaseAction {
        uid: Uid::of(uid),
        name: name.to_string(),
    })
}

#[test]
fn bonded_device_inherits_and_sums_bandwidth() {
    let mut gateway = vs::GatewayConfig::new("gw1", "check_point_gateway");
    let mut eth1 = vs::Interface::new("eth1");
    eth1.address = Some(net("10.0.1.1/24"));
    eth1.state = false;
    let eth2 = vs::Interface::new("eth2");
    let mut bond0 = vs::Interface::new("bond0");
    bond0.mtu = Some(9000);
    bond0.address = Some(net("10.0.9.1/24"));
    let mut bond_vlan = vs::Interface::new("bond0.100");
    bond_vlan.parent_interface = Some("bond0".to_string());
    bond_vlan.vlan_id = Some(100);
    for iface in [eth1, eth2, bond0, bond_vlan] {
        gateway.interfaces.insert(iface.name.clone(), iface);
    }
    let mut group = vs::BondingGroup::new(0);
    group.interfaces.extend(["eth1".to_string(), "eth2".to_string()]);
    gateway.bonding_groups.insert(0, group);

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&gateway, None, &mut diags).expect("converts");
    assert!(diags.is_empty());

    let member = cfg.interfaces.get("eth1").expect("eth1");
    assert!(member.active);
    assert_eq!(member.address, None);
    assert_eq!(member.mtu, 9000);
    assert_eq!(member.channel_group, Some("bond0".to_string()));

    let aggregate = cfg.interfaces.get("bond0").expect("bond0");
    assert_eq!(aggregate.address, Some(net("10.0.9.1/24")));
    assert_eq!(aggregate.bandwidth, Some(2000e6));
    assert!(aggregate.channel_group_members.contains("eth2"));

    let child = cfg.interfaces.get("bond0.100").expect("bond0.100");
    assert_eq!(child.encapsulation_vlan, Some(100));
    assert_eq!(child.bandwidth, Some(2000e6));
}

#[test]
fn routes_install_into_the_default_vrf() {
    let mut gateway = device_with_eth0();
    for (dest, nexthops) in [
        (
            "0.0.0.0/0",
            vec![(vs::NexthopTarget::Logical("eth0".to_string()), None)],
        ),
        (
            "1.0.0.0/8",
            vec![
                (vs::NexthopTarget::Address(ip("10.0.0.254")), Some(3)),
                // Unreachable through any connected network.
                (vs::NexthopTarget::Address(ip("192.168.9.9")), None),
            ],
        ),
    ] {
        let destination = net(dest);
        gateway.static_routes.insert(
            destination,
            vs::StaticRoute {
                destination,
                comment: None,
                nexthops: nexthops
                    .into_iter()
                    .map(|(target, priority)| (target.clone(), vs::Nexthop { priority, target }))
                    .collect(),
            },
        );
    }

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&gateway, None, &mut diags).expect("converts");
    let routes = &cfg.vrfs.get(VRF_NAME).expect("default vrf").static_routes;
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().any(|r| {
        r.network == net("0.0.0.0/0")
            && r.next_hop == NextHop::Interface("eth0".to_string())
            && r.administrative_cost == 0
    }));
    assert!(routes.iter().any(|r| {
        r.network == net("1.0.0.0/8")
            && r.next_hop == NextHop::Ip(ip("10.0.0.254"))
            && r.administrative_cost == 3
    }));
}

#[test]
fn management_policy_compiles_to_filters_spaces_and_nat() {
    let layer = AccessLayer {
        uid: Uid::of("layer-uid"),
        name: "corporate".to_string(),
        objects: BTreeMap::new(),
        rulebase: vec![
            AccessRuleOrSection::Rule(AccessRule {
                uid: Uid::of("r1"),
                name: "block-internal".to_string(),
                enabled: true,
                action: Uid::of("drop"),
                sources: vec![Uid::of("internal")],
                destinations: vec![Uid::of("any")],
                services: vec![Uid::of("any")],
            }),
            AccessRuleOrSection::Rule(AccessRule {
                uid: Uid::of("r2"),
                name: "allow-rest".to_string(),
                enabled: true,
                action: Uid::of("accept"),
                sources: vec![Uid::of("any")],
                destinations: vec![Uid::of("any")],
                services: vec![Uid::of("any")],
            }),
        ],
    };
    let nat = NatRulebase {
        uid: Uid::of("nat"),
        objects: BTreeMap::new(),
        rules: vec![NatRule {
            uid: Uid::of("n1"),
            enabled: true,
            method: NatMethod::Hide,
            original_source: Uid::of("internal"),
            original_destination: Uid::of("any"),
            original_service: Uid::of("any"),
            translated_source: Uid::of("hide-ip"),
            translated_destination: Uid::of("any"),
            translated_service: Uid::of("any"),
            install_on: vec![Uid::of("targets")],
        }],
    };
    let record = GatewayOrServer {
        uid: Uid::of("gw-uid"),
        name: "gw1".to_string(),
        ipv4_address: Some(ip("10.0.0.1")),
        interfaces: Vec::new(),
        policy: GatewayPolicy {
            access_policy_name: Some("standard".to_string()),
        },
        variant: GatewayVariant::SimpleGateway,
    };
    let domain = ManagementDomain {
        name: "d1".to_string(),
        gateways_and_servers: BTreeMap::from([(record.uid.clone(), record)]),
        packages: BTreeMap::from([(
            Uid::of("pkg"),
            ManagementPackage {
                package: Package {
                    uid: Uid::of("pkg"),
                    name: "standard".to_string(),
                },
                access_layers: vec![layer],
                nat_rulebase: Some(nat),
            },
        )]),
        objects: vec![
            space("any", "Any", AddressSpaceBody::Any),
            space(
                "internal",
                "internal",
                AddressSpaceBody::Network {
                    prefix: net("10.0.0.0/24"),
                },
            ),
            space(
                "hide-ip",
                "hide-ip",
                AddressSpaceBody::Host {
                    address: ip("203.0.113.7"),
                },
            ),
            action("accept", "Accept"),
            action("drop", "Drop"),
            ManagementObject::PolicyTargets(PolicyTargets {
                uid: Uid::of("targets"),
            }),
        ],
    };
    let mgmt = single_domain(domain);

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&device_with_eth0(), Some(&mgmt), &mut diags).expect("converts");
    assert!(diags.is_empty());

    let composite = cfg
        .ip_access_lists
        .get(INTERFACE_ACL_NAME)
        .expect("composite filter");
    assert!(cfg.ip_access_lists.contains_key("corporate (layer-uid)"));
    let internal_flow = Flow::tcp(ip("10.0.0.5"), ip("8.8.8.8"));
    let external_flow = Flow::tcp(ip("9.9.9.9"), ip("8.8.8.8"));
    assert_eq!(
        composite.action_for(&internal_flow, &cfg.ip_access_lists, &cfg.ip_spaces),
        Some(LineAction::Deny)
    );
    assert_eq!(
        composite.action_for(&external_flow, &cfg.ip_access_lists, &cfg.ip_spaces),
        Some(LineAction::Permit)
    );

    let eth0 = cfg.interfaces.get("eth0").expect("eth0");
    assert_eq!(eth0.incoming_filter.as_deref(), Some(INTERFACE_ACL_NAME));
    let chain = eth0.incoming_transformation.as_ref().expect("nat chain");
    assert_eq!(chain.apply(&internal_flow, &cfg.ip_spaces).src_ip, ip("203.0.113.7"));
    assert_eq!(chain.apply(&external_flow, &cfg.ip_spaces).src_ip, ip("9.9.9.9"));

    assert!(cfg.ip_spaces.contains_key("internal"));
    assert_eq!(
        cfg.ip_spaces.get("gw1"),
        Some(&vi_model::IpSpace::Host(ip("10.0.0.1")))
    );
}

#[test]
fn cluster_member_gets_vrrp_priority_by_position() {
    let mut cluster = GatewayOrServer {
        uid: Uid::of("cl"),
        name: "cluster1".to_string(),
        ipv4_address: Some(ip("10.0.0.100")),
        interfaces: vec![MgmtInterface {
            name: "eth0".to_string(),
            ipv4_address: Some(ip("10.0.0.100")),
            mask_length: Some(24),
        }],
        policy: GatewayPolicy::default(),
        variant: GatewayVariant::Cluster {
            member_names: vec!["other".to_string(), "gw1".to_string()],
        },
    };
    cluster.interfaces.push(MgmtInterface {
        name: "eth9".to_string(),
        ipv4_address: None,
        mask_length: None,
    });
    let member = GatewayOrServer {
        uid: Uid::of("m"),
        name: "gw1".to_string(),
        ipv4_address: Some(ip("10.0.0.1")),
        interfaces: Vec::new(),
        policy: GatewayPolicy::default(),
        variant: GatewayVariant::ClusterMember,
    };
    let domain = ManagementDomain {
        name: "d1".to_string(),
        gateways_and_servers: BTreeMap::from([
            (cluster.uid.clone(), cluster),
            (member.uid.clone(), member),
        ]),
        packages: BTreeMap::new(),
        objects: Vec::new(),
    };
    let mgmt = single_domain(domain);

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&device_with_eth0(), Some(&mgmt), &mut diags).expect("converts");
    assert!(diags.is_empty());

    let eth0 = cfg.interfaces.get("eth0").expect("eth0");
    let group = eth0.vrrp_groups.get(&0).expect("vrrp group");
    assert_eq!(group.priority, VRRP_MAX_PRIORITY - 1);
    assert_eq!(group.virtual_address, net("10.0.0.100/24"));
    assert!(group.preempt);
}

#[test]
fn dangling_package_reference_is_diagnosed_but_conversion_continues() {
    let record = GatewayOrServer {
        uid: Uid::of("gw-uid"),
        name: "gw1".to_string(),
        ipv4_address: Some(ip("10.0.0.1")),
        interfaces: Vec::new(),
        policy: GatewayPolicy {
            access_policy_name: Some("missing".to_string()),
        },
        variant: GatewayVariant::SimpleGateway,
    };
    let domain = ManagementDomain {
        name: "d1".to_string(),
        gateways_and_servers: BTreeMap::from([(record.uid.clone(), record)]),
        packages: BTreeMap::new(),
        objects: Vec::new(),
    };
    let mgmt = single_domain(domain);

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&device_with_eth0(), Some(&mgmt), &mut diags).expect("converts");
    assert!(diags.has_code("missing_package"));
    assert!(cfg.ip_access_lists.is_empty());
    assert!(cfg.interfaces.get("eth0").expect("eth0").incoming_filter.is_none());
}

#[test]
fn unmatched_management_record_leaves_device_conversion_intact() {
    // Management export whose only gateway identity IP overlaps none of the
    // device's interface addresses.
    let record = GatewayOrServer {
        uid: Uid::of("gw-uid"),
        name: "someone-else".to_string(),
        ipv4_address: Some(ip("172.16.0.1")),
        interfaces: Vec::new(),
        policy: GatewayPolicy {
            access_policy_name: Some("standard".to_string()),
        },
        variant: GatewayVariant::SimpleGateway,
    };
    let domain = ManagementDomain {
        name: "d1".to_string(),
        gateways_and_servers: BTreeMap::from([(record.uid.clone(), record)]),
        packages: BTreeMap::new(),
        objects: vec![space("any", "Any", AddressSpaceBody::Any)],
    };
    let mgmt = single_domain(domain);

    let mut gateway = device_with_eth0();
    let destination = net("0.0.0.0/0");
    gateway.static_routes.insert(
        destination,
        vs::StaticRoute {
            destination,
            comment: None,
            nexthops: [(
                vs::NexthopTarget::Logical("eth0".to_string()),
                vs::Nexthop {
                    priority: None,
                    target: vs::NexthopTarget::Logical("eth0".to_string()),
                },
            )]
            .into(),
        },
    );

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&gateway, Some(&mgmt), &mut diags).expect("converts");
    assert!(diags.is_empty());

    assert!(cfg.ip_spaces.is_empty());
    assert!(cfg.ip_space_metadata.is_empty());
    assert!(cfg.ip_access_lists.is_empty());

    let eth0 = cfg.interfaces.get("eth0").expect("eth0");
    assert_eq!(eth0.address, Some(net("10.0.0.1/24")));
    assert!(eth0.incoming_filter.is_none());
    assert!(eth0.incoming_transformation.is_none());
    let routes = &cfg.vrfs.get(VRF_NAME).expect("default vrf").static_routes;
    assert_eq!(routes.len(), 1);
    assert!(routes.iter().any(|r| {
        r.network == net("0.0.0.0/0") && r.next_hop == NextHop::Interface("eth0".to_string())
    }));
}

#[test]
fn conversion_is_deterministic() {
    let gateway = device_with_eth0();
    let mut first_diags = Diagnostics::new();
    let mut second_diags = Diagnostics::new();
    let first = convert_gateway(&gateway, None, &mut first_diags).expect("converts");
    let second = convert_gateway(&gateway, None, &mut second_diags).expect("converts");
    assert_eq!(first, second);
    assert_eq!(first_diags, second_diags);
}
