//! `labstock-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{find_by_id, find_by_id_mut, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{BatchId, ChemicalId, Sequence, UsageId};
