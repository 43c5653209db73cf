//! Article CRUD operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use wikidocs_core::error::AppError;
use wikidocs_core::result::AppResult;
use wikidocs_core::types::filter::{Condition, Filter};
use wikidocs_core::types::pagination::PageResponse;
use wikidocs_core::types::specification::Specification;
use wikidocs_database::relations::ArticleRelations;
use wikidocs_database::Repository;
use wikidocs_entity::{Article, Category, Tag};

use crate::context::RequestContext;

use super::query::ArticleQuery;

/// Manages article CRUD operations.
#[derive(Debug, Clone)]
pub struct ArticleService {
    /// Article repository.
    articles: Arc<Repository<Article>>,
    /// Category repository, for foreign-key checks.
    categories: Arc<Repository<Category>>,
    /// Tag repository, for tag existence checks.
    tags: Arc<Repository<Tag>>,
    /// Relation loader for category/tag hydration and junction writes.
    relations: Arc<ArticleRelations>,
}

/// Request to create a new article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateArticleRequest {
    /// Article name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Article body text.
    #[serde(default)]
    pub description: String,
    /// Owning category id.
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Tags to attach.
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Request to replace an existing article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    /// New article name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// New body text.
    #[serde(default)]
    pub description: String,
    /// New owning category id.
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Full replacement tag set.
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Tag summary embedded in article responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSummary {
    /// Tag id.
    pub id: i32,
    /// Tag name.
    pub name: String,
}

/// Article shape returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    /// Article id.
    pub id: i32,
    /// Article name.
    pub name: String,
    /// Article body text.
    pub description: String,
    /// Owning category id.
    pub category_id: i32,
    /// Owning category name, when resolvable.
    pub category_name: Option<String>,
    /// Attached tags.
    pub tags: Vec<TagSummary>,
    /// Who created the article.
    pub created_by: String,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// Who last modified the article.
    pub modified_by: Option<String>,
    /// When the article was last modified.
    pub modified_at: Option<DateTime<Utc>>,
}

impl ArticleResponse {
    fn from_parts(article: Article, category_name: Option<String>, tags: Vec<Tag>) -> Self {
        Self {
            id: article.id,
            name: article.name,
            description: article.description,
            category_id: article.category_id,
            category_name,
            tags: tags
                .into_iter()
                .map(|tag| TagSummary {
                    id: tag.id,
                    name: tag.name,
                })
                .collect(),
            created_by: article.created_by,
            created_at: article.created_at,
            modified_by: article.modified_by,
            modified_at: article.modified_at,
        }
    }
}

impl ArticleService {
    /// Creates a new article service.
    pub fn new(
        articles: Arc<Repository<Article>>,
        categories: Arc<Repository<Category>>,
        tags: Arc<Repository<Tag>>,
        relations: Arc<ArticleRelations>,
    ) -> Self {
        Self {
            articles,
            categories,
            tags,
            relations,
        }
    }

    /// Creates an article, stamping creation audit fields from the
    /// context.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateArticleRequest,
    ) -> AppResult<ArticleResponse> {
        req.validate()?;
        let category = self.require_category(req.category_id).await?;
        let tags = self.require_tags(&req.tag_ids).await?;

        let article = Article {
            id: 0,
            name: req.name,
            description: req.description,
            category_id: req.category_id,
            created_by: ctx.username.clone(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
            category: None,
            tags: Vec::new(),
        };
        let saved = self.articles.add(&article).await?;
        self.relations.replace_tags(saved.id, &req.tag_ids).await?;

        info!(id = saved.id, name = %saved.name, "Article created");
        Ok(ArticleResponse::from_parts(saved, Some(category.name), tags))
    }

    /// Gets an article by id, with category and tags attached.
    ///
    /// Fails with not-found when the id has no row.
    pub async fn get_by_id(&self, id: i32) -> AppResult<ArticleResponse> {
        let article = self
            .articles
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {id} not found")))?;
        let mut responses = self.to_responses(vec![article]).await?;
        Ok(responses.remove(0))
    }

    /// Lists all articles matching a query, unpaged.
    pub async fn get_many(&self, query: &ArticleQuery) -> AppResult<Vec<ArticleResponse>> {
        let spec = query.to_specification()?;
        let articles = self.articles.list(&spec).await?;
        self.to_responses(articles).await
    }

    /// Fetches one page of articles matching a query.
    pub async fn get_paged(
        &self,
        query: &ArticleQuery,
    ) -> AppResult<PageResponse<ArticleResponse>> {
        let spec = query.to_specification()?;
        let page = self.articles.get_paged(&query.page_request(), &spec).await?;
        let PageResponse {
            items,
            page: number,
            page_size,
            total_items,
            ..
        } = page;
        let responses = self.to_responses(items).await?;
        Ok(PageResponse::new(responses, number, page_size, total_items))
    }

    /// Replaces an article by id, preserving the original creation audit
    /// fields and stamping modification fields from the context.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        req: UpdateArticleRequest,
    ) -> AppResult<ArticleResponse> {
        req.validate()?;
        let existing = self
            .articles
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {id} not found")))?;
        let category = self.require_category(req.category_id).await?;
        let tags = self.require_tags(&req.tag_ids).await?;

        let replacement = Article {
            id,
            name: req.name,
            description: req.description,
            category_id: req.category_id,
            created_by: existing.created_by,
            created_at: existing.created_at,
            modified_by: Some(ctx.username.clone()),
            modified_at: Some(Utc::now()),
            category: None,
            tags: Vec::new(),
        };
        let saved = self.articles.update(&replacement).await?;
        self.relations.replace_tags(saved.id, &req.tag_ids).await?;

        info!(id, "Article updated");
        Ok(ArticleResponse::from_parts(saved, Some(category.name), tags))
    }

    /// Deletes an article by id. Fails with not-found when absent.
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let existing = self
            .articles
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {id} not found")))?;
        self.articles.remove(&existing).await?;
        info!(id, "Article deleted");
        Ok(())
    }

    /// Removes the given article instance. No-op (false) when unsaved or
    /// already gone.
    pub async fn remove_by_value(&self, article: &Article) -> AppResult<bool> {
        self.articles.remove(article).await
    }

    /// Whether an article with the given id exists.
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.articles
            .any(&Specification::of(Filter::from(Condition::eq_int(
                "id",
                i64::from(id),
            ))))
            .await
    }

    /// Whether any article matches the query.
    ///
    /// Goes through the full specification so a tag filter brings its
    /// junction join along.
    pub async fn any(&self, query: &ArticleQuery) -> AppResult<bool> {
        self.articles.any(&query.to_specification()?).await
    }

    /// First article matching the query, or `None`.
    pub async fn first_or_default(
        &self,
        query: &ArticleQuery,
    ) -> AppResult<Option<ArticleResponse>> {
        let spec = query.to_specification()?;
        match self.articles.first_or_default(&spec).await? {
            Some(article) => {
                let mut responses = self.to_responses(vec![article]).await?;
                Ok(Some(responses.remove(0)))
            }
            None => Ok(None),
        }
    }

    /// Lists articles by an explicit specification, includes applied.
    pub async fn list(&self, spec: &Specification<Article>) -> AppResult<Vec<ArticleResponse>> {
        let articles = self.articles.list(spec).await?;
        self.to_responses(articles).await
    }

    async fn require_category(&self, category_id: i32) -> AppResult<Category> {
        self.categories
            .find(category_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category {category_id} not found")))
    }

    async fn require_tags(&self, tag_ids: &[i32]) -> AppResult<Vec<Tag>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut unique = tag_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        let found = self
            .tags
            .get(&Filter::from(Condition::in_ints("id", unique.clone())), None)
            .await?;
        if found.len() != unique.len() {
            return Err(AppError::validation("One or more tags do not exist"));
        }
        Ok(found)
    }

    /// Hydrate category names and tag sets for a batch of articles.
    async fn to_responses(&self, articles: Vec<Article>) -> AppResult<Vec<ArticleResponse>> {
        let article_ids: Vec<i32> = articles.iter().map(|a| a.id).collect();
        let mut category_ids: Vec<i32> = articles.iter().map(|a| a.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories = self.relations.load_categories(&category_ids).await?;
        let mut tags = self.relations.load_tags(&article_ids).await?;

        Ok(articles
            .into_iter()
            .map(|article| {
                let category_name = categories.get(&article.category_id).map(|c| c.name.clone());
                let article_tags = tags.remove(&article.id).unwrap_or_default();
                ArticleResponse::from_parts(article, category_name, article_tags)
            })
            .collect())
    }
}
