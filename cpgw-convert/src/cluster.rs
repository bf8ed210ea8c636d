//! Cluster membership resolution for VRRP synthesis.

use std::collections::BTreeMap;

use crate::diag::Diagnostics;
use crate::mgmt::{GatewayOrServer, GatewayVariant, ManagementDomain, MgmtInterface};

/// A cluster member's view of its cluster: the cluster's virtual interfaces
/// and this member's position in the declared member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAttachment {
    /// Cluster interfaces by name.
    pub interfaces: BTreeMap<String, MgmtInterface>,
    /// Zero-based position; earlier members take higher VRRP priority.
    pub member_index: usize,
}

/// Resolve the cluster a member gateway belongs to.
///
/// Non-members resolve to nothing silently; a member whose cluster record is
/// absent from the domain is diagnosed.
pub fn find_cluster_attachment(
    gateway: &GatewayOrServer,
    domain: &ManagementDomain,
    diags: &mut Diagnostics,
) -> Option<ClusterAttachment> {
    if gateway.variant != GatewayVariant::ClusterMember {
        return None;
    }
    let attachment = domain.gateways_and_servers.values().find_map(|record| {
        let GatewayVariant::Cluster { member_names } = &record.variant else {
            return None;
        };
        let member_index = member_names.iter().position(|name| *name == gateway.name)?;
        Some(ClusterAttachment {
            interfaces: record
                .interfaces
                .iter()
                .map(|iface| (iface.name.clone(), iface.clone()))
                .collect(),
            member_index,
        })
    });
    if attachment.is_none() {
        diags.push(
            "missing_cluster",
            format!(
                "Could not find matching cluster for cluster member '{}'",
                gateway.name
            ),
        );
    }
    attachment
}
