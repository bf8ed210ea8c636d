//! Compilation of the NAT rulebase into an incoming transformation chain.
//!
//! Only enabled HIDE rules installed on the device are compiled. Rulebase
//! order is preserved as chain precedence, so the first matching rule
//! rewrites and later rules are shadowed for that flow.

use std::collections::BTreeMap;

use vi_model::{MatchExpr, Transformation, TransformationStep};

use crate::diag::Diagnostics;
use crate::match_expr::{
    address_operands_to_match, service_operands_to_match, MatchDirection,
};
use crate::mgmt::{
    AddressSpaceBody, GatewayOrServer, ManagementObject, NatMethod, NatRule, NatRulebase, Uid,
};

/// Compile `rulebase` to a transformation chain for `gateway`, or `None`
/// when no rule applies.
pub fn convert_nat_rulebase(
    rulebase: &NatRulebase,
    gateway: &GatewayOrServer,
    objects: &BTreeMap<Uid, ManagementObject>,
    diags: &mut Diagnostics,
) -> Option<Transformation> {
    let candidates: Vec<&NatRule> = rulebase
        .rules
        .iter()
        .filter(|rule| rule.enabled && installs_on(rule, gateway, objects))
        .collect();
    if candidates.iter().any(|rule| rule.method != NatMethod::Hide) {
        diags.push("unsupported_nat_rule", "Non-HIDE NAT rules are unsupported");
    }
    let links: Vec<Transformation> = candidates
        .into_iter()
        .filter(|rule| rule.method == NatMethod::Hide)
        .filter_map(|rule| convert_hide_rule(rule, objects, diags))
        .collect();
    links.into_iter().rev().fold(None, |chain, mut link| {
        link.or_else = chain.map(Box::new);
        Some(link)
    })
}

/// Whether a rule's install-on list covers this gateway. A policy-targets
/// marker means every gateway the package is assigned to.
fn installs_on(
    rule: &NatRule,
    gateway: &GatewayOrServer,
    objects: &BTreeMap<Uid, ManagementObject>,
) -> bool {
    rule.install_on.iter().any(|uid| {
        *uid == gateway.uid
            || matches!(objects.get(uid), Some(ManagementObject::PolicyTargets(_)))
    })
}

fn convert_hide_rule(
    rule: &NatRule,
    objects: &BTreeMap<Uid, ManagementObject>,
    diags: &mut Diagnostics,
) -> Option<Transformation> {
    let step = match objects.get(&rule.translated_source) {
        Some(ManagementObject::AddressSpace(space)) => match &space.body {
            AddressSpaceBody::Host { address } => TransformationStep::AssignSourceIp(*address),
            _ => {
                diags.push(
                    "unsupported_nat_translation",
                    format!(
                        "NAT rule translated-source '{}' is not a host and will be ignored.",
                        space.name
                    ),
                );
                return None;
            }
        },
        _ => {
            diags.push(
                "unsupported_nat_translation",
                format!(
                    "NAT rule translated-source '{}' does not resolve to an address object and will be ignored.",
                    rule.translated_source
                ),
            );
            return None;
        }
    };
    let guard = MatchExpr::And(vec![
        service_operands_to_match(objects, std::slice::from_ref(&rule.original_service), diags),
        address_operands_to_match(
            objects,
            std::slice::from_ref(&rule.original_source),
            MatchDirection::Source,
            diags,
        ),
        address_operands_to_match(
            objects,
            std::slice::from_ref(&rule.original_destination),
            MatchDirection::Destination,
            diags,
        ),
    ]);
    Some(Transformation::always(guard, vec![step]))
}
