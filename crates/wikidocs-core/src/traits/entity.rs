//! The entity capability trait consumed by the generic repository.
//!
//! Every persisted WikiDocs record has a server-assigned integer identity,
//! a required name, and audit metadata. The trait exposes the table
//! metadata the repository and the specification evaluator need to build
//! queries without knowing the concrete entity type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;

/// A value bound into a generated SQL statement.
///
/// Covers exactly the column types used by the WikiDocs schema. The
/// database crate dispatches each variant to the matching
/// `QueryBuilder::push_bind` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// A 32-bit integer column.
    Int(i32),
    /// A non-null text column.
    Text(String),
    /// A nullable text column.
    OptText(Option<String>),
    /// A non-null timestamptz column.
    Timestamp(DateTime<Utc>),
    /// A nullable timestamptz column.
    OptTimestamp(Option<DateTime<Utc>>),
}

/// A relation that can be eagerly included when querying an entity.
///
/// Each variant contributes a JOIN clause (affecting query shape, never
/// the base result set) and the set of joined columns that become legal
/// filter targets while the relation is included.
pub trait EntityRelation: Copy + PartialEq + Eq + fmt::Debug + Send + Sync + 'static {
    /// The SQL JOIN clause attaching this relation to the base table.
    fn join_clause(&self) -> &'static str;

    /// Fully qualified columns this relation makes available for
    /// filtering.
    fn columns(&self) -> &'static [&'static str];
}

/// Relation type for entities with no includable relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRelation {}

impl EntityRelation for NoRelation {
    fn join_clause(&self) -> &'static str {
        match *self {}
    }

    fn columns(&self) -> &'static [&'static str] {
        match *self {}
    }
}

/// Capability trait for persisted entities: identity + name + table metadata.
///
/// Implemented by `Article`, `Category`, and `Tag` in `wikidocs-entity`.
/// The generic repository is parameterized over this trait and never
/// mentions a concrete entity.
pub trait Entity:
    for<'r> sqlx::FromRow<'r, PgRow>
    + fmt::Debug
    + Clone
    + Serialize
    + Send
    + Sync
    + Unpin
    + 'static
{
    /// Table name in the database.
    const TABLE: &'static str;

    /// All own columns, including `id`. Used as the filter/sort allow-list.
    const COLUMNS: &'static [&'static str];

    /// Insertable/updatable columns, excluding the server-assigned `id`.
    /// Must match the order of [`Entity::bind_values`].
    const DATA_COLUMNS: &'static [&'static str];

    /// Relations that can be included via a specification.
    type Relation: EntityRelation;

    /// The server-assigned identity (0 when unsaved).
    fn id(&self) -> i32;

    /// The required display name.
    fn name(&self) -> &str;

    /// Column values for insert/update, in [`Entity::DATA_COLUMNS`] order.
    fn bind_values(&self) -> Vec<SqlValue>;
}
