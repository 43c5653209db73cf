//! Article entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use wikidocs_core::traits::{Entity, SqlValue};

use crate::category::Category;
use crate::tag::Tag;

use super::relation::ArticleRelation;

/// A wiki article belonging to one category and carrying any number of
/// tags.
///
/// `category` and `tags` are hydrated relation fields: they are not
/// columns of the `articles` table and are populated only when the
/// corresponding relation is included in a query specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Article {
    /// Server-assigned identity (0 when unsaved).
    pub id: i32,
    /// Article name.
    pub name: String,
    /// Article body text.
    pub description: String,
    /// Owning category (required foreign key).
    pub category_id: i32,
    /// Who created the article.
    pub created_by: String,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// Who last modified the article.
    pub modified_by: Option<String>,
    /// When the article was last modified.
    pub modified_at: Option<DateTime<Utc>>,
    /// The owning category, when eagerly included.
    #[sqlx(skip)]
    pub category: Option<Category>,
    /// The attached tags, when eagerly included.
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
}

impl PartialEq for Article {
    /// Identity equality: unsaved articles are never equal, even to
    /// themselves.
    fn eq(&self, other: &Self) -> bool {
        self.id != 0 && other.id != 0 && self.id == other.id
    }
}

impl Entity for Article {
    const TABLE: &'static str = "articles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "category_id",
        "created_by",
        "created_at",
        "modified_by",
        "modified_at",
    ];
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "category_id",
        "created_by",
        "created_at",
        "modified_by",
        "modified_at",
    ];
    type Relation = ArticleRelation;

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.description.clone()),
            SqlValue::Int(self.category_id),
            SqlValue::Text(self.created_by.clone()),
            SqlValue::Timestamp(self.created_at),
            SqlValue::OptText(self.modified_by.clone()),
            SqlValue::OptTimestamp(self.modified_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsaved_article_is_not_equal_to_itself() {
        let article = Article {
            name: "Recipe1".to_string(),
            ..Default::default()
        };
        assert_ne!(article, article);
        assert_ne!(article, article.clone());
    }

    #[test]
    fn test_saved_articles_are_equal_by_id() {
        let a = Article {
            id: 5,
            name: "Recipe1".to_string(),
            ..Default::default()
        };
        let mut b = a.clone();
        b.description = "different body".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsaved_never_equals_saved() {
        let saved = Article {
            id: 5,
            ..Default::default()
        };
        let unsaved = Article::default();
        assert_ne!(saved, unsaved);
        assert_ne!(unsaved, saved);
    }

    #[test]
    fn test_bind_values_match_data_columns() {
        let article = Article::default();
        assert_eq!(article.bind_values().len(), Article::DATA_COLUMNS.len());
    }
}
