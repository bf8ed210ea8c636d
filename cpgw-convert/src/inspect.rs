//! Gateway configuration summary rendering.

use crate::vs::{bond_interface_name, GatewayConfig, NexthopTarget};

/// Render a terminal-friendly summary of one parsed gateway config.
pub fn render_summary(config: &GatewayConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("hostname: {}\n", config.hostname));
    out.push_str(&format!("format: {}\n", config.format));

    out.push_str(&format!("interfaces ({}):\n", config.interfaces.len()));
    for iface in config.interfaces.values() {
        let address = iface
            .address
            .map_or_else(|| "-".to_string(), |net| net.to_string());
        let state = if iface.state { "up" } else { "down" };
        out.push_str(&format!(
            "  {} {} {} mtu={}\n",
            iface.name,
            state,
            address,
            iface.mtu_effective()
        ));
    }

    if !config.bonding_groups.is_empty() {
        out.push_str(&format!("bonding groups ({}):\n", config.bonding_groups.len()));
        for group in config.bonding_groups.values() {
            let members: Vec<&str> = group.interfaces.iter().map(String::as_str).collect();
            out.push_str(&format!(
                "  {} mode={:?} members=[{}]\n",
                bond_interface_name(group.number),
                group.mode_effective(),
                members.join(", ")
            ));
        }
    }

    if !config.static_routes.is_empty() {
        out.push_str(&format!("static routes ({}):\n", config.static_routes.len()));
        for route in config.static_routes.values() {
            for nexthop in route.nexthops.values() {
                let target = match &nexthop.target {
                    NexthopTarget::Address(ip) => format!("via {ip}"),
                    NexthopTarget::Logical(name) => format!("dev {name}"),
                    NexthopTarget::Blackhole => "blackhole".to_string(),
                    NexthopTarget::Reject => "reject".to_string(),
                };
                let priority = nexthop
                    .priority
                    .map_or_else(String::new, |p| format!(" priority {p}"));
                out.push_str(&format!("  {} {}{}\n", route.destination, target, priority));
            }
        }
    }
    out
}
