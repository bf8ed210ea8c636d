//! Conversion of management objects into named VI IP spaces.

use std::collections::BTreeMap;

use vi_model::{IpSpace, IpSpaceMetadata, ViConfiguration};

use crate::diag::Diagnostics;
use crate::mgmt::{AddressSpaceBody, AddressSpaceObject, ManagementObject, Uid};

/// Populate `cfg` with one named IP space per convertible registry object.
///
/// Spaces are keyed by object display name; when two objects share a name the
/// later one in registry order wins. Group members are emitted as references
/// so membership follows the named environment at evaluation time; a member
/// uid missing from the registry contributes nothing. Gateway and server
/// records become host spaces at their identity IP, or the empty space when
/// they have none.
pub fn convert_objects(
    objects: &BTreeMap<Uid, ManagementObject>,
    cfg: &mut ViConfiguration,
    diags: &mut Diagnostics,
) {
    for object in objects.values() {
        match object {
            ManagementObject::AddressSpace(space) => {
                define(cfg, &space.name, address_space(objects, space), space.body.type_label());
            }
            ManagementObject::GatewayOrServer(gateway) => {
                let space = gateway
                    .ipv4_address
                    .map_or(IpSpace::Empty, IpSpace::Host);
                define(cfg, &gateway.name, space, "gateway-or-server");
            }
            ManagementObject::Unknown(unknown) => {
                diags.push(
                    "unknown_object_type",
                    format!(
                        "Conversion does not handle objects of type {}. These objects will be ignored.",
                        unknown.type_name
                    ),
                );
            }
            ManagementObject::RulebaseAction(_)
            | ManagementObject::PolicyTargets(_)
            | ManagementObject::Original(_) => {}
        }
    }
}

fn address_space(
    objects: &BTreeMap<Uid, ManagementObject>,
    space: &AddressSpaceObject,
) -> IpSpace {
    match &space.body {
        AddressSpaceBody::Host { address } => IpSpace::Host(*address),
        AddressSpaceBody::Network { prefix } => IpSpace::Prefix(*prefix),
        AddressSpaceBody::Range { start, end } => IpSpace::Range(*start, *end),
        AddressSpaceBody::Group { members } => IpSpace::Union(
            members
                .iter()
                .filter_map(|uid| objects.get(uid))
                .map(|member| IpSpace::Reference(member.name().to_string()))
                .collect(),
        ),
        AddressSpaceBody::Any => IpSpace::Universe,
    }
}

fn define(cfg: &mut ViConfiguration, name: &str, space: IpSpace, source_type: &str) {
    cfg.ip_spaces.insert(name.to_string(), space);
    cfg.ip_space_metadata.insert(
        name.to_string(),
        IpSpaceMetadata {
            source_name: name.to_string(),
            source_type: source_type.to_string(),
        },
    );
}
