//! Core traits shared across the WikiDocs crates.

pub mod entity;

pub use entity::{Entity, EntityRelation, NoRelation, SqlValue};
