//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use wikidocs_core::traits::{Entity, NoRelation, SqlValue};

/// A tag attached to many articles (many-to-many).
///
/// The article back-reference is query-side only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Server-assigned identity (0 when unsaved).
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

impl PartialEq for Tag {
    /// Identity equality: unsaved tags are never equal, even to themselves.
    fn eq(&self, other: &Self) -> bool {
        self.id != 0 && other.id != 0 && self.id == other.id
    }
}

impl Entity for Tag {
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "created_by",
        "created_at",
        "modified_by",
        "modified_at",
    ];
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "created_by",
        "created_at",
        "modified_by",
        "modified_at",
    ];
    type Relation = NoRelation;

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bind_values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.name.clone()),
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
    fn test_unsaved_tag_is_not_equal_to_itself() {
        let tag = Tag {
            name: "howto".to_string(),
            ..Default::default()
        };
        assert_ne!(tag, tag);
    }

    #[test]
    fn test_saved_tags_compare_by_id_only() {
        let a = Tag {
            id: 1,
            name: "howto".to_string(),
            ..Default::default()
        };
        let b = Tag {
            id: 2,
            name: "howto".to_string(),
            ..Default::default()
        };
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
