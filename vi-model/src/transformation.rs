use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::acl::MatchExpr;
use crate::flow::Flow;
use crate::ip_space::IpSpace;

/// One rewrite applied to a matching flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformationStep {
    /// Replace the flow's source address.
    AssignSourceIp(Ipv4Addr),
}

/// A guarded rewrite chain with first-match precedence.
///
/// When the guard matches, the steps apply and the chain stops; otherwise
/// evaluation continues with `or_else`. A flow matching no link of the chain
/// passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub guard: MatchExpr,
    pub steps: Vec<TransformationStep>,
    pub or_else: Option<Box<Transformation>>,
}

impl Transformation {
    /// A single chain link with no continuation.
    pub fn always(guard: MatchExpr, steps: Vec<TransformationStep>) -> Self {
        Transformation {
            guard,
            steps,
            or_else: None,
        }
    }

    /// Apply the chain to `flow`, returning the (possibly rewritten) flow.
    pub fn apply(&self, flow: &Flow, named: &BTreeMap<String, IpSpace>) -> Flow {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.guard.matches(flow, named) {
                let mut out = flow.clone();
                for step in &current.steps {
                    match step {
                        TransformationStep::AssignSourceIp(ip) => out.src_ip = *ip,
                    }
                }
                return out;
            }
            link = current.or_else.as_deref();
        }
        flow.clone()
    }
}
