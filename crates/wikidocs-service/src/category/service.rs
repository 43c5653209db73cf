//! Category CRUD operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use wikidocs_core::error::AppError;
use wikidocs_core::result::AppResult;
use wikidocs_core::types::field_map::FieldMap;
use wikidocs_core::types::filter::{Condition, Filter};
use wikidocs_core::types::pagination::{PageRequest, PageResponse};
use wikidocs_core::types::sorting::Sort;
use wikidocs_core::types::specification::Specification;
use wikidocs_database::Repository;
use wikidocs_entity::Category;

use crate::article::query::SortOrder;
use crate::context::RequestContext;

/// Mapping from category request fields to entity columns.
pub const CATEGORY_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id"),
    ("name", "name"),
    ("part_name", "name"),
]);

/// Manages category CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryService {
    categories: Arc<Repository<Category>>,
}

/// Request to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request to rename an existing category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// New category name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Category list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryQuery {
    /// Page number (1-based; clamped).
    #[serde(default)]
    pub page: u64,
    /// Page size (clamped).
    #[serde(default)]
    pub page_size: u64,
    /// Sort direction on the name.
    #[serde(default)]
    pub sorting: SortOrder,
    /// Case-insensitive substring match on the name.
    #[serde(default)]
    pub part_name: Option<String>,
}

/// Category shape returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Category id.
    pub id: i32,
    /// Category name.
    pub name: String,
    /// Who created the category.
    pub created_by: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// Who last modified the category.
    pub modified_by: Option<String>,
    /// When the category was last modified.
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_by: category.created_by,
            created_at: category.created_at,
            modified_by: category.modified_by,
            modified_at: category.modified_at,
        }
    }
}

impl CategoryQuery {
    /// The clamped page request for this query.
    pub fn page_request(&self) -> PageRequest {
        let page = if self.page == 0 { 1 } else { self.page };
        let page_size = if self.page_size == 0 { 10 } else { self.page_size };
        PageRequest::new(page, page_size)
    }

    /// The request-field filter, before translation.
    pub fn request_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(part) = &self.part_name {
            if !part.trim().is_empty() {
                filter = filter.and(Condition::ilike("part_name", format!("%{}%", part.trim())));
            }
        }
        filter
    }

    /// Translate this query into an entity-side specification.
    pub fn to_specification(&self) -> AppResult<Specification<Category>> {
        let criteria = CATEGORY_FIELDS.translate_filter(&self.request_filter())?;
        let mut builder = Specification::builder().criteria(criteria);
        match self.sorting {
            SortOrder::None => {}
            SortOrder::Ascending => builder = builder.sort(Sort::asc("name")),
            SortOrder::Descending => builder = builder.sort(Sort::desc("name")),
        }
        builder.build()
    }
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<Repository<Category>>) -> Self {
        Self { categories }
    }

    /// Creates a category, stamping creation audit fields.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        req.validate()?;
        let category = Category {
            id: 0,
            name: req.name,
            created_by: ctx.username.clone(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        };
        let saved = self.categories.add(&category).await?;
        info!(id = saved.id, name = %saved.name, "Category created");
        Ok(saved.into())
    }

    /// Gets a category by id. Fails with not-found when absent.
    pub async fn get_by_id(&self, id: i32) -> AppResult<CategoryResponse> {
        self.categories
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    /// Lists all categories matching a query, unpaged.
    pub async fn get_many(&self, query: &CategoryQuery) -> AppResult<Vec<CategoryResponse>> {
        let spec = query.to_specification()?;
        let categories = self.categories.list(&spec).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Fetches one page of categories matching a query.
    pub async fn get_paged(
        &self,
        query: &CategoryQuery,
    ) -> AppResult<PageResponse<CategoryResponse>> {
        let spec = query.to_specification()?;
        let page = self
            .categories
            .get_paged(&query.page_request(), &spec)
            .await?;
        Ok(page.map(Into::into))
    }

    /// Renames a category, preserving creation audit fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        req: UpdateCategoryRequest,
    ) -> AppResult<CategoryResponse> {
        req.validate()?;
        let existing = self
            .categories
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        let replacement = Category {
            id,
            name: req.name,
            created_by: existing.created_by,
            created_at: existing.created_at,
            modified_by: Some(ctx.username.clone()),
            modified_at: Some(Utc::now()),
        };
        let saved = self.categories.update(&replacement).await?;
        info!(id, "Category updated");
        Ok(saved.into())
    }

    /// Deletes a category by id. Articles in the category are removed by
    /// the store's cascade.
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let existing = self
            .categories
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        self.categories.remove(&existing).await?;
        info!(id, "Category deleted");
        Ok(())
    }

    /// Removes the given category instance. No-op (false) when unsaved
    /// or already gone.
    pub async fn remove_by_value(&self, category: &Category) -> AppResult<bool> {
        self.categories.remove(category).await
    }

    /// Whether a category with the given id exists.
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.categories
            .any(&Specification::of(Filter::from(Condition::eq_int(
                "id",
                i64::from(id),
            ))))
            .await
    }

    /// Whether any category matches the query.
    pub async fn any(&self, query: &CategoryQuery) -> AppResult<bool> {
        self.categories.any(&query.to_specification()?).await
    }

    /// First category matching the query, or `None`.
    pub async fn first_or_default(
        &self,
        query: &CategoryQuery,
    ) -> AppResult<Option<CategoryResponse>> {
        let spec = query.to_specification()?;
        Ok(self
            .categories
            .first_or_default(&spec)
            .await?
            .map(Into::into))
    }

    /// Lists categories by an explicit specification.
    pub async fn list(&self, spec: &Specification<Category>) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.categories.list(spec).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikidocs_core::types::filter::FilterOp;
    use wikidocs_core::types::sorting::SortDirection;

    #[test]
    fn test_query_translates_part_name() {
        let query = CategoryQuery {
            part_name: Some("kitchen".to_string()),
            ..Default::default()
        };
        let spec = query.to_specification().unwrap();
        let condition = &spec.criteria().conditions()[0];
        assert_eq!(condition.field, "name");
        assert_eq!(condition.op, FilterOp::ILike);
    }

    #[test]
    fn test_query_sorting() {
        let query = CategoryQuery {
            sorting: SortOrder::Ascending,
            ..Default::default()
        };
        let sort = query.to_specification().unwrap().sort().cloned().unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}
