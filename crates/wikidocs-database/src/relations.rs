//! Article relation loaders and junction writes.
//!
//! The generic repository is relation-agnostic; the article↔tag junction
//! and category hydration need article-specific SQL, which lives here.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};

use wikidocs_core::error::{AppError, ErrorKind};
use wikidocs_core::result::AppResult;
use wikidocs_entity::{Category, Tag};

/// Loads related rows for articles and maintains the `article_tags`
/// junction.
#[derive(Debug, Clone)]
pub struct ArticleRelations {
    pool: PgPool,
}

/// A tag row joined with the article it belongs to.
#[derive(Debug, FromRow)]
struct TaggedRow {
    article_id: i32,
    #[sqlx(flatten)]
    tag: Tag,
}

impl ArticleRelations {
    /// Create a new relation loader backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the categories for a set of category ids, keyed by id.
    pub async fn load_categories(&self, category_ids: &[i32]) -> AppResult<HashMap<i32, Category>> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
                .bind(category_ids.to_vec())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load categories", e)
                })?;
        Ok(categories.into_iter().map(|c| (c.id, c)).collect())
    }

    /// Load the tags of a set of articles, keyed by article id.
    ///
    /// Articles without tags are absent from the map.
    pub async fn load_tags(&self, article_ids: &[i32]) -> AppResult<HashMap<i32, Vec<Tag>>> {
        if article_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, TaggedRow>(
            "SELECT article_tags.article_id, tags.* FROM article_tags \
             INNER JOIN tags ON tags.id = article_tags.tag_id \
             WHERE article_tags.article_id = ANY($1) ORDER BY tags.name ASC",
        )
        .bind(article_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load article tags", e))?;

        let mut by_article: HashMap<i32, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_article.entry(row.article_id).or_default().push(row.tag);
        }
        Ok(by_article)
    }

    /// Replace the tag set of an article with the given tag ids.
    pub async fn replace_tags(&self, article_id: i32, tag_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
            .bind(article_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear article tags", e)
            })?;

        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO article_tags (article_id, tag_id) \
             SELECT $1, unnest($2::int4[]) ON CONFLICT DO NOTHING",
        )
        .bind(article_id)
        .bind(tag_ids.to_vec())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to attach article tags", e)
        })?;
        Ok(())
    }
}
