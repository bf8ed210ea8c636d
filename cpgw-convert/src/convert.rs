//! Top-level conversion of one device.
//!
//! One call converts one VS snapshot, optionally joined with a
//! management-plane snapshot, into one VI configuration plus an ordered
//! diagnostics log. Component order is fixed: management policy first (it
//! feeds the interface builder), then topology, then routes.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use thiserror::Error;
use vi_model::{ViConfiguration, Vrf};

use crate::access_rules::convert_access_layers;
use crate::cluster::find_cluster_attachment;
use crate::diag::Diagnostics;
use crate::ip_space::convert_objects;
use crate::mgmt::ManagementConfig;
use crate::nat_rules::convert_nat_rulebase;
use crate::registry::{find_access_package, find_gateway_and_domain, merge_objects};
use crate::static_routes::convert_static_routes;
use crate::topology::{convert_interface, resolve_aggregate_bandwidth, TopologyContext};
use crate::vs::GatewayConfig;

/// Name of the single routing instance every conversion produces.
pub const VRF_NAME: &str = "default";

/// Unrecoverable conversion failures. Anything recoverable is a diagnostic.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("configuration has no hostname")]
    MissingHostname,
}

/// Convert one device.
///
/// Diagnostics accumulate in `diags` in the order components run; they never
/// abort the conversion.
pub fn convert_gateway(
    gateway: &GatewayConfig,
    mgmt: Option<&ManagementConfig>,
    diags: &mut Diagnostics,
) -> Result<ViConfiguration, ConvertError> {
    if gateway.hostname.is_empty() {
        return Err(ConvertError::MissingHostname);
    }
    let mut cfg = ViConfiguration::new(&gateway.hostname, &gateway.format);

    let device_ips: BTreeSet<Ipv4Addr> = gateway
        .interfaces
        .values()
        .filter_map(|iface| iface.address.map(|net| net.addr()))
        .collect();

    let mut cluster = None;
    let mut incoming_filter = None;
    let mut transformation = None;
    if let Some(mgmt) = mgmt {
        if let Some((domain, record)) = find_gateway_and_domain(mgmt, &device_ips) {
            cluster = find_cluster_attachment(record, domain, diags);
            if let Some(package) = find_access_package(domain, record, diags) {
                let objects = merge_objects(package, domain);
                convert_objects(&objects, &mut cfg, diags);
                incoming_filter = Some(convert_access_layers(
                    &package.access_layers,
                    &objects,
                    &mut cfg.ip_access_lists,
                    diags,
                ));
                if let Some(rulebase) = &package.nat_rulebase {
                    transformation = convert_nat_rulebase(rulebase, record, &objects, diags);
                }
            }
        }
    }

    let ctx = TopologyContext {
        interfaces: &gateway.interfaces,
        bonding_groups: &gateway.bonding_groups,
        cluster: cluster.as_ref(),
        incoming_filter,
        transformation,
    };
    for iface in gateway.interfaces.values() {
        let converted = convert_interface(iface, &ctx, diags);
        cfg.interfaces.insert(converted.name.clone(), converted);
    }
    resolve_aggregate_bandwidth(&mut cfg.interfaces);

    let mut vrf = Vrf::new(VRF_NAME);
    vrf.static_routes = convert_static_routes(&gateway.static_routes, &gateway.interfaces);
    cfg.vrfs.insert(VRF_NAME.to_string(), vrf);

    Ok(cfg)
}
