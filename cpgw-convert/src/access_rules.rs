//! Compilation of access layers into VI packet filters.

use std::collections::BTreeMap;

use vi_model::{AclLine, IpAccessList, LineAction, MatchExpr};

use crate::diag::Diagnostics;
use crate::match_expr::{
    address_operands_to_match, service_operands_to_match, MatchDirection,
};
use crate::mgmt::{AccessLayer, AccessRule, AccessRuleOrSection, ManagementObject, Uid};

/// Name of the composite filter attached to every interface.
pub const INTERFACE_ACL_NAME: &str = "~INTERFACE_ACL~";

/// Filter name for one access layer. Layer names are not unique across
/// packages, so the uid is embedded to disambiguate.
pub fn access_layer_acl_name(layer: &AccessLayer) -> String {
    format!("{} ({})", layer.name, layer.uid)
}

/// Compile each access layer to its own filter plus one composite filter
/// deferring to the layers in order. Returns the composite's name.
///
/// Evaluating layers sequentially differs from the source semantics, where
/// a flow must be accepted by every layer; with more than one layer only
/// the first match applies, which is diagnosed.
pub fn convert_access_layers(
    layers: &[AccessLayer],
    objects: &BTreeMap<Uid, ManagementObject>,
    acls: &mut BTreeMap<String, IpAccessList>,
    diags: &mut Diagnostics,
) -> String {
    if layers.len() > 1 {
        diags.push(
            "multiple_access_layers",
            "Matching on multiple access layers is not supported, so only the first matching access rule will be applied.",
        );
    }
    let mut composite_lines = Vec::new();
    for layer in layers {
        let acl_name = access_layer_acl_name(layer);
        let lines = flatten_rules(layer)
            .filter_map(|rule| convert_rule(rule, objects, diags))
            .collect();
        acls.insert(
            acl_name.clone(),
            IpAccessList {
                name: acl_name.clone(),
                lines,
            },
        );
        composite_lines.push(AclLine::AclRef {
            name: layer.name.clone(),
            acl_name,
        });
    }
    acls.insert(
        INTERFACE_ACL_NAME.to_string(),
        IpAccessList {
            name: INTERFACE_ACL_NAME.to_string(),
            lines: composite_lines,
        },
    );
    INTERFACE_ACL_NAME.to_string()
}

/// Enabled rules of a layer in rulebase order, section rules inlined.
fn flatten_rules(layer: &AccessLayer) -> impl Iterator<Item = &AccessRule> {
    layer
        .rulebase
        .iter()
        .flat_map(|entry| match entry {
            AccessRuleOrSection::Rule(rule) => std::slice::from_ref(rule),
            AccessRuleOrSection::Section(section) if section.enabled => &section.rules[..],
            AccessRuleOrSection::Section(_) => &[],
        })
        .filter(|rule| rule.enabled)
}

fn convert_rule(
    rule: &AccessRule,
    objects: &BTreeMap<Uid, ManagementObject>,
    diags: &mut Diagnostics,
) -> Option<AclLine> {
    let action = rule_action(rule, objects, diags)?;
    let matching = MatchExpr::And(vec![
        service_operands_to_match(objects, &rule.services, diags),
        address_operands_to_match(objects, &rule.sources, MatchDirection::Source, diags),
        address_operands_to_match(
            objects,
            &rule.destinations,
            MatchDirection::Destination,
            diags,
        ),
    ]);
    Some(AclLine::Expr {
        name: rule.name.clone(),
        action,
        matching,
    })
}

fn rule_action(
    rule: &AccessRule,
    objects: &BTreeMap<Uid, ManagementObject>,
    diags: &mut Diagnostics,
) -> Option<LineAction> {
    match objects.get(&rule.action) {
        Some(ManagementObject::RulebaseAction(action)) => match action.name.as_str() {
            "Accept" => Some(LineAction::Permit),
            "Drop" => Some(LineAction::Deny),
            other => {
                diags.push(
                    "unsupported_rule_action",
                    format!(
                        "Access rule '{}' has unsupported action '{other}' and will be ignored.",
                        rule.name
                    ),
                );
                None
            }
        },
        _ => {
            diags.push(
                "unsupported_rule_action",
                format!(
                    "Access rule '{}' action '{}' does not resolve to a rulebase action and will be ignored.",
                    rule.name, rule.action
                ),
            );
            None
        }
    }
}
