//! Resolution of rule operand references into VI match expressions.
//!
//! Unresolvable or unsupported operands degrade to a diagnosed never-matching
//! expression; resolution never fails a conversion. Named objects are matched
//! through IP-space references so that group membership is resolved by the
//! VI model at evaluation time.

use std::collections::BTreeMap;

use vi_model::{IpSpace, MatchExpr};

use crate::diag::Diagnostics;
use crate::mgmt::{AddressSpaceBody, ManagementObject, Uid};

/// Which flow header an address operand constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
    Source,
    Destination,
}

fn direction_match(dir: MatchDirection, space: IpSpace) -> MatchExpr {
    match dir {
        MatchDirection::Source => MatchExpr::SrcIp(space),
        MatchDirection::Destination => MatchExpr::DstIp(space),
    }
}

fn combine_or(mut operands: Vec<MatchExpr>) -> MatchExpr {
    match operands.len() {
        0 => MatchExpr::True,
        1 => operands.remove(0),
        _ => MatchExpr::Or(operands),
    }
}

/// Convert a rule's source or destination operand list.
pub fn address_operands_to_match(
    objects: &BTreeMap<Uid, ManagementObject>,
    uids: &[Uid],
    dir: MatchDirection,
    diags: &mut Diagnostics,
) -> MatchExpr {
    let operands = uids
        .iter()
        .map(|uid| address_operand_to_match(objects, uid, dir, diags))
        .collect();
    combine_or(operands)
}

fn address_operand_to_match(
    objects: &BTreeMap<Uid, ManagementObject>,
    uid: &Uid,
    dir: MatchDirection,
    diags: &mut Diagnostics,
) -> MatchExpr {
    let Some(object) = objects.get(uid) else {
        diags.push(
            "missing_object",
            format!("Rule references unknown object '{uid}'; the match can never succeed."),
        );
        return MatchExpr::False;
    };
    match object {
        ManagementObject::AddressSpace(space) => match &space.body {
            AddressSpaceBody::Any => MatchExpr::True,
            _ => direction_match(dir, IpSpace::Reference(space.name.clone())),
        },
        ManagementObject::GatewayOrServer(gateway) => {
            direction_match(dir, IpSpace::Reference(gateway.name.clone()))
        }
        other => {
            diags.push(
                "unsupported_match_object",
                format!(
                    "Object '{}' cannot be used as an address match; the match can never succeed.",
                    other.name()
                ),
            );
            MatchExpr::False
        }
    }
}

/// Convert a rule's service operand list.
///
/// Only the any-object is representable in this model; anything else
/// degrades to a diagnosed never-matching expression.
pub fn service_operands_to_match(
    objects: &BTreeMap<Uid, ManagementObject>,
    uids: &[Uid],
    diags: &mut Diagnostics,
) -> MatchExpr {
    let operands = uids
        .iter()
        .map(|uid| service_operand_to_match(objects, uid, diags))
        .collect();
    combine_or(operands)
}

fn service_operand_to_match(
    objects: &BTreeMap<Uid, ManagementObject>,
    uid: &Uid,
    diags: &mut Diagnostics,
) -> MatchExpr {
    let Some(object) = objects.get(uid) else {
        diags.push(
            "missing_object",
            format!("Rule references unknown object '{uid}'; the match can never succeed."),
        );
        return MatchExpr::False;
    };
    match object {
        ManagementObject::AddressSpace(space) if matches!(space.body, AddressSpaceBody::Any) => {
            MatchExpr::True
        }
        other => {
            diags.push(
                "unsupported_service_object",
                format!(
                    "Service object '{}' is not supported; the match can never succeed.",
                    other.name()
                ),
            );
            MatchExpr::False
        }
    }
}
