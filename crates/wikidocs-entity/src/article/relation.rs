//! Includable relations of the article entity.

use wikidocs_core::traits::EntityRelation;

/// Relations that can be eagerly included when querying articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleRelation {
    /// The owning category (many articles to one category).
    Category,
    /// The attached tags (many-to-many via `article_tags`).
    Tags,
}

impl EntityRelation for ArticleRelation {
    fn join_clause(&self) -> &'static str {
        match self {
            Self::Category => "LEFT JOIN categories ON categories.id = articles.category_id",
            Self::Tags => {
                "LEFT JOIN article_tags ON article_tags.article_id = articles.id \
                 LEFT JOIN tags ON tags.id = article_tags.tag_id"
            }
        }
    }

    fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Category => &["categories.id", "categories.name"],
            Self::Tags => &["article_tags.tag_id", "tags.id", "tags.name"],
        }
    }
}
