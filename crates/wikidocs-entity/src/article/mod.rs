//! Article entity.

pub mod model;
pub mod relation;

pub use model::Article;
pub use relation::ArticleRelation;
