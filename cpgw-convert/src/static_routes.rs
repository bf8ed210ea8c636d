//! Conversion of VS static routes into VI routes.

use std::collections::{BTreeMap, BTreeSet};

use ipnet::Ipv4Net;
use vi_model::{NextHop, StaticRoute};

use crate::vs;

/// Convert all configured static routes.
///
/// Each valid nexthop of a route becomes its own VI route; identical results
/// collapse in the returned set, so blackhole and reject nexthops of one
/// destination yield a single discard route. An unset nexthop priority is
/// the most preferred and maps to cost 0; explicit priorities map to their
/// own value.
pub fn convert_static_routes(
    routes: &BTreeMap<Ipv4Net, vs::StaticRoute>,
    interfaces: &BTreeMap<String, vs::Interface>,
) -> BTreeSet<StaticRoute> {
    let mut converted = BTreeSet::new();
    for route in routes.values() {
        for nexthop in route.nexthops.values() {
            let Some(next_hop) = convert_nexthop(&nexthop.target, interfaces) else {
                continue;
            };
            converted.insert(StaticRoute {
                network: route.destination,
                next_hop,
                administrative_cost: nexthop.priority.unwrap_or(0),
                recursive: false,
            });
        }
    }
    converted
}

/// A gateway nexthop is reachable only through a connected network; routes
/// toward anything else are not installable and are skipped.
fn convert_nexthop(
    target: &vs::NexthopTarget,
    interfaces: &BTreeMap<String, vs::Interface>,
) -> Option<NextHop> {
    match target {
        vs::NexthopTarget::Address(ip) => interfaces
            .values()
            .any(|iface| iface.address.is_some_and(|net| net.contains(ip)))
            .then(|| NextHop::Ip(*ip)),
        vs::NexthopTarget::Logical(name) => {
            debug_assert!(interfaces.contains_key(name), "nexthop interface exists");
            interfaces
                .contains_key(name)
                .then(|| NextHop::Interface(name.clone()))
        }
        vs::NexthopTarget::Blackhole | vs::NexthopTarget::Reject => Some(NextHop::Discard),
    }
}
