//! Performance-review feedback tracker backend.
//!
//! Managers submit structured feedback (strengths, improvements, sentiment)
//! about their direct reports; employees view and acknowledge it; both
//! roles read aggregate dashboards. The crate is laid out hexagonally:
//! [`domain`] holds the entities, access policy, and use-case services;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements
//! the driven ports (stores, clock, credential verification).

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
