//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use wikidocs_core::traits::{Entity, NoRelation, SqlValue};

/// A category grouping many articles.
///
/// The article back-reference is query-side only; categories do not
/// carry their articles in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Server-assigned identity (0 when unsaved).
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

impl PartialEq for Category {
    /// Identity equality: unsaved categories are never equal, even to
    /// themselves.
    fn eq(&self, other: &Self) -> bool {
        self.id != 0 && other.id != 0 && self.id == other.id
    }
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
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
    fn test_unsaved_category_is_not_equal_to_itself() {
        let category = Category {
            name: "Kitchen".to_string(),
            ..Default::default()
        };
        assert_ne!(category, category.clone());
        assert_ne!(category, category);
    }

    #[test]
    fn test_saved_categories_are_equal_by_id() {
        let a = Category {
            id: 3,
            name: "Kitchen".to_string(),
            ..Default::default()
        };
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bind_values_match_data_columns() {
        let category = Category::default();
        assert_eq!(
            category.bind_values().len(),
            Category::DATA_COLUMNS.len()
        );
    }
}
