//! Orchestration domain
//!
//! Phases of a solve run and the per-model responses it collects.

pub mod entities;
pub mod value_objects;
