use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::ip_space::IpSpace;

/// Disposition of a matching filter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineAction {
    Permit,
    Deny,
}

/// A boolean predicate over a [`Flow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchExpr {
    /// Matches every flow.
    True,
    /// Matches no flow.
    False,
    /// Conjunction of all operands.
    And(Vec<MatchExpr>),
    /// Disjunction of any operand.
    Or(Vec<MatchExpr>),
    /// Flow source address lies in the space.
    SrcIp(IpSpace),
    /// Flow destination address lies in the space.
    DstIp(IpSpace),
}

impl MatchExpr {
    /// Evaluate this predicate against a flow, resolving named IP spaces
    /// through `named`.
    pub fn matches(&self, flow: &Flow, named: &BTreeMap<String, IpSpace>) -> bool {
        match self {
            MatchExpr::True => true,
            MatchExpr::False => false,
            MatchExpr::And(operands) => operands.iter().all(|e| e.matches(flow, named)),
            MatchExpr::Or(operands) => operands.iter().any(|e| e.matches(flow, named)),
            MatchExpr::SrcIp(space) => space.contains(flow.src_ip, named),
            MatchExpr::DstIp(space) => space.contains(flow.dst_ip, named),
        }
    }
}

/// One line of an [`IpAccessList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclLine {
    /// A concrete predicate with an action.
    Expr {
        name: String,
        action: LineAction,
        matching: MatchExpr,
    },
    /// Defers to another named list; a verdict there is the verdict here.
    AclRef { name: String, acl_name: String },
}

/// A named, ordered packet filter. First matching line wins; a flow that
/// matches no line falls through to the device's global default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAccessList {
    pub name: String,
    pub lines: Vec<AclLine>,
}

impl IpAccessList {
    /// First-match-wins verdict for `flow`, or `None` if no line matches.
    ///
    /// `acls` resolves [`AclLine::AclRef`] lines; a referenced list that does
    /// not exist matches nothing.
    pub fn action_for(
        &self,
        flow: &Flow,
        acls: &BTreeMap<String, IpAccessList>,
        named: &BTreeMap<String, IpSpace>,
    ) -> Option<LineAction> {
        for line in &self.lines {
            match line {
                AclLine::Expr {
                    action, matching, ..
                } => {
                    if matching.matches(flow, named) {
                        return Some(*action);
                    }
                }
                AclLine::AclRef { acl_name, .. } => {
                    if let Some(inner) = acls.get(acl_name) {
                        if let Some(action) = inner.action_for(flow, acls, named) {
                            return Some(action);
                        }
                    }
                }
            }
        }
        None
    }
}
