//! Order resource: entity wiring, validation pipelines and the pending-only
//! delete rule.

pub mod entity;
pub mod pipelines;
