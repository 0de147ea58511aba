//! Dish resource: entity wiring and validation pipelines.

pub mod entity;
pub mod pipelines;
