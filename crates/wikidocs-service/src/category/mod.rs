//! Category domain service.

pub mod service;

pub use service::{
    CategoryQuery, CategoryResponse, CategoryService, CreateCategoryRequest,
    UpdateCategoryRequest,
};
