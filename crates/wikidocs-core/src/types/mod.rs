//! Shared query and pagination types.

pub mod field_map;
pub mod filter;
pub mod pagination;
pub mod sorting;
pub mod specification;

pub use field_map::FieldMap;
pub use filter::{Condition, Filter, FilterOp, FilterValue};
pub use pagination::{PageRequest, PageResponse};
pub use sorting::{Sort, SortDirection};
pub use specification::{Specification, SpecificationBuilder};
