//! Object registry construction and gateway/package matching.
//!
//! The registry is built fresh per conversion and frozen before any compiler
//! consumes it; later entries overwrite earlier ones on uid collision, by
//! design (revisions of the same object are not distinguished).

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use crate::diag::Diagnostics;
use crate::mgmt::{
    GatewayOrServer, ManagementConfig, ManagementDomain, ManagementObject, ManagementPackage, Uid,
};

/// Merge all object dictionaries visible to one package conversion.
///
/// Merge order: the NAT rulebase's local dictionary, each access layer's
/// local dictionary in layer order, the domain-wide object list, and the
/// domain's gateway/server map. Later writes win.
pub fn merge_objects(
    package: &ManagementPackage,
    domain: &ManagementDomain,
) -> BTreeMap<Uid, ManagementObject> {
    let mut objects = BTreeMap::new();
    if let Some(rulebase) = &package.nat_rulebase {
        for (uid, obj) in &rulebase.objects {
            objects.insert(uid.clone(), obj.clone());
        }
    }
    for layer in &package.access_layers {
        for (uid, obj) in &layer.objects {
            objects.insert(uid.clone(), obj.clone());
        }
    }
    for obj in &domain.objects {
        objects.insert(obj.uid().clone(), obj.clone());
    }
    for (uid, gateway) in &domain.gateways_and_servers {
        objects.insert(
            uid.clone(),
            ManagementObject::GatewayOrServer(gateway.clone()),
        );
    }
    objects
}

/// Locate the management record for this device by identity IP.
///
/// Scans servers, domains, and gateways in map order and returns the first
/// record whose identity IP is one of `device_ips`. IP reuse across domains
/// is unhandled; the first record in this defined order wins.
pub fn find_gateway_and_domain<'a>(
    mgmt: &'a ManagementConfig,
    device_ips: &BTreeSet<Ipv4Addr>,
) -> Option<(&'a ManagementDomain, &'a GatewayOrServer)> {
    for server in mgmt.servers.values() {
        for domain in server.domains.values() {
            let found = domain
                .gateways_and_servers
                .values()
                .find(|gw| gw.ipv4_address.is_some_and(|ip| device_ips.contains(&ip)));
            if let Some(gateway) = found {
                return Some((domain, gateway));
            }
        }
    }
    None
}

/// Locate the policy package assigned to a gateway by exact name match.
///
/// A gateway with no access-policy name has no package (not an error); a
/// name that matches no package in the domain yields a diagnostic.
pub fn find_access_package<'a>(
    domain: &'a ManagementDomain,
    gateway: &GatewayOrServer,
    diags: &mut Diagnostics,
) -> Option<&'a ManagementPackage> {
    let package_name = gateway.policy.access_policy_name.as_deref()?;
    let found = domain
        .packages
        .values()
        .find(|p| p.package.name == package_name);
    if found.is_none() {
        diags.push(
            "missing_package",
            format!(
                "Gateway or server '{}' access-policy-name refers to non-existent package '{}'",
                gateway.name, package_name
            ),
        );
    }
    found
}
