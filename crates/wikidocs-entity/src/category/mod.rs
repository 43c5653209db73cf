//! Category entity.

pub mod model;

pub use model::Category;
