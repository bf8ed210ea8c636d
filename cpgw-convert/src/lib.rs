//! Gateway configuration conversion to a vendor-independent device model.
//!
//! This library converts one parsed gateway configuration, optionally joined
//! with the policy export of its management server, into the evaluable
//! vendor-independent model of `vi-model`. Recoverable anomalies never abort
//! a conversion; they accumulate as ordered diagnostics alongside the result.
//!
//! # Architecture
//!
//! ## Input models
//!
//! - [`vs`] — Vendor-specific device model (interfaces, bonding groups,
//!   static routes) with the vendor's defaulting rules
//! - [`mgmt`] — Management-plane policy model (objects, access layers,
//!   NAT rulebase, gateways, clusters)
//!
//! ## Conversion
//!
//! - [`convert`] — Top-level per-device orchestration
//! - [`registry`] — Object dictionary merging and gateway/package matching
//! - [`topology`] — Interface construction (bonding, VLANs, speeds, VRRP)
//! - [`access_rules`] — Access layers to packet filters
//! - [`match_expr`] — Rule operand references to match expressions
//! - [`nat_rules`] — NAT rulebase to a source-rewrite chain
//! - [`static_routes`] — Static route resolution
//! - [`cluster`] — Cluster membership for VRRP synthesis
//! - [`ip_space`] — Management objects to named IP spaces
//!
//! ## Reporting
//!
//! - [`diag`] — Ordered per-device diagnostics log
//! - [`inspect`] — Gateway configuration summary rendering
//!
//! # Example
//!
//! ```ignore
//! use cpgw_convert::convert::convert_gateway;
//! use cpgw_convert::diag::Diagnostics;
//!
//! let mut diags = Diagnostics::new();
//! let cfg = convert_gateway(&gateway, Some(&mgmt), &mut diags)?;
//! println!("{} interfaces, {} warnings", cfg.interfaces.len(), diags.entries().len());
//! ```

pub mod access_rules;
pub mod cluster;
pub mod convert;
pub mod diag;
pub mod inspect;
pub mod ip_space;
pub mod match_expr;
pub mod mgmt;
pub mod nat_rules;
pub mod registry;
pub mod static_routes;
pub mod topology;
pub mod vs;
