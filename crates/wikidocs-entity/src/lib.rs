//! # wikidocs-entity
//!
//! Entity models for the WikiDocs domain: articles, categories, and tags.
//! Each model implements [`wikidocs_core::traits::Entity`] so the generic
//! repository can operate on it.
//!
//! Equality on all entities is identity-based: two entities are equal iff
//! both carry a non-zero id and the ids match. An unsaved entity
//! (`id == 0`) is not equal to anything, including itself, which is why
//! no model implements `Eq`.

pub mod article;
pub mod category;
pub mod tag;

pub use article::{Article, ArticleRelation};
pub use category::Category;
pub use tag::Tag;
