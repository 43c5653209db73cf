//! Tag CRUD operations.

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
use wikidocs_entity::Tag;

use crate::article::query::SortOrder;
use crate::context::RequestContext;

/// Mapping from tag request fields to entity columns.
pub const TAG_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id"),
    ("name", "name"),
    ("part_name", "name"),
]);

/// Manages tag CRUD operations.
#[derive(Debug, Clone)]
pub struct TagService {
    tags: Arc<Repository<Tag>>,
}

/// Request to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Request to rename an existing tag.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    /// New tag name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Tag list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagQuery {
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

/// Tag shape returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    /// Tag id.
    pub id: i32,
    /// Tag name.
    pub name: String,
    /// Who created the tag.
    pub created_by: String,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
    /// Who last modified the tag.
    pub modified_by: Option<String>,
    /// When the tag was last modified.
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_by: tag.created_by,
            created_at: tag.created_at,
            modified_by: tag.modified_by,
            modified_at: tag.modified_at,
        }
    }
}

impl TagQuery {
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
    pub fn to_specification(&self) -> AppResult<Specification<Tag>> {
        let criteria = TAG_FIELDS.translate_filter(&self.request_filter())?;
        let mut builder = Specification::builder().criteria(criteria);
        match self.sorting {
            SortOrder::None => {}
            SortOrder::Ascending => builder = builder.sort(Sort::asc("name")),
            SortOrder::Descending => builder = builder.sort(Sort::desc("name")),
        }
        builder.build()
    }
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<Repository<Tag>>) -> Self {
        Self { tags }
    }

    /// Creates a tag, stamping creation audit fields.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateTagRequest,
    ) -> AppResult<TagResponse> {
        req.validate()?;
        let tag = Tag {
            id: 0,
            name: req.name,
            created_by: ctx.username.clone(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        };
        let saved = self.tags.add(&tag).await?;
        info!(id = saved.id, name = %saved.name, "Tag created");
        Ok(saved.into())
    }

    /// Gets a tag by id. Fails with not-found when absent.
    pub async fn get_by_id(&self, id: i32) -> AppResult<TagResponse> {
        self.tags
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))
    }

    /// Lists all tags matching a query, unpaged.
    pub async fn get_many(&self, query: &TagQuery) -> AppResult<Vec<TagResponse>> {
        let spec = query.to_specification()?;
        let tags = self.tags.list(&spec).await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }

    /// Fetches one page of tags matching a query.
    pub async fn get_paged(&self, query: &TagQuery) -> AppResult<PageResponse<TagResponse>> {
        let spec = query.to_specification()?;
        let page = self.tags.get_paged(&query.page_request(), &spec).await?;
        Ok(page.map(Into::into))
    }

    /// Renames a tag, preserving creation audit fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        req: UpdateTagRequest,
    ) -> AppResult<TagResponse> {
        req.validate()?;
        let existing = self
            .tags
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;
        let replacement = Tag {
            id,
            name: req.name,
            created_by: existing.created_by,
            created_at: existing.created_at,
            modified_by: Some(ctx.username.clone()),
            modified_at: Some(Utc::now()),
        };
        let saved = self.tags.update(&replacement).await?;
        info!(id, "Tag updated");
        Ok(saved.into())
    }

    /// Deletes a tag by id. Junction rows are removed by the store's
    /// cascade; articles themselves are untouched.
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let existing = self
            .tags
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;
        self.tags.remove(&existing).await?;
        info!(id, "Tag deleted");
        Ok(())
    }

    /// Removes the given tag instance. No-op (false) when unsaved or
    /// already gone.
    pub async fn remove_by_value(&self, tag: &Tag) -> AppResult<bool> {
        self.tags.remove(tag).await
    }

    /// Whether a tag with the given id exists.
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.tags
            .any(&Specification::of(Filter::from(Condition::eq_int(
                "id",
                i64::from(id),
            ))))
            .await
    }

    /// Whether any tag matches the query.
    pub async fn any(&self, query: &TagQuery) -> AppResult<bool> {
        self.tags.any(&query.to_specification()?).await
    }

    /// First tag matching the query, or `None`.
    pub async fn first_or_default(&self, query: &TagQuery) -> AppResult<Option<TagResponse>> {
        let spec = query.to_specification()?;
        Ok(self.tags.first_or_default(&spec).await?.map(Into::into))
    }

    /// Lists tags by an explicit specification.
    pub async fn list(&self, spec: &Specification<Tag>) -> AppResult<Vec<TagResponse>> {
        let tags = self.tags.list(spec).await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }
}
