//! Article list filtering and its translation onto entity columns.
//!
//! Callers phrase filters over request fields (`part_name`,
//! `category_ids`, `tag_ids`). [`ARTICLE_FIELDS`] rewrites those onto
//! the article table (and the tag junction) before anything reaches the
//! repository; sorting goes through the typed [`ArticleSortKey`] rather
//! than a free-form field name.

use serde::{Deserialize, Serialize};

use wikidocs_core::result::AppResult;
use wikidocs_core::types::field_map::FieldMap;
use wikidocs_core::types::filter::{Condition, Filter};
use wikidocs_core::types::pagination::PageRequest;
use wikidocs_core::types::sorting::{Sort, SortDirection};
use wikidocs_core::types::specification::Specification;
use wikidocs_entity::article::ArticleRelation;
use wikidocs_entity::Article;

/// Mapping from article request fields to entity columns.
pub const ARTICLE_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id"),
    ("name", "name"),
    ("part_name", "name"),
    ("description", "description"),
    ("category_id", "category_id"),
    ("category_ids", "category_id"),
    ("tag_ids", "article_tags.tag_id"),
]);

/// Requested sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Store-defined order.
    #[default]
    None,
    /// Ascending by name.
    Ascending,
    /// Descending by name.
    Descending,
}

/// Typed sort keys exposed for articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSortKey {
    /// Sort by article name.
    Name,
    /// Sort by creation time.
    CreatedAt,
}

impl ArticleSortKey {
    /// The entity-side sort for this key.
    pub fn to_sort(self, direction: SortDirection) -> Sort {
        match self {
            Self::Name => Sort::new("name", direction),
            Self::CreatedAt => Sort::new("created_at", direction),
        }
    }
}

/// Article list filter, as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Page number (1-based; clamped).
    #[serde(default)]
    pub page: u64,
    /// Page size (clamped).
    #[serde(default)]
    pub page_size: u64,
    /// Sort direction on the article name.
    #[serde(default)]
    pub sorting: SortOrder,
    /// Case-insensitive substring match on the name.
    #[serde(default)]
    pub part_name: Option<String>,
    /// Restrict to these category ids.
    #[serde(default)]
    pub category_ids: Vec<i32>,
    /// Restrict to articles carrying any of these tags.
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

impl ArticleQuery {
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
        if !self.category_ids.is_empty() {
            filter = filter.and(Condition::in_ints("category_ids", self.category_ids.clone()));
        }
        if !self.tag_ids.is_empty() {
            filter = filter.and(Condition::in_ints("tag_ids", self.tag_ids.clone()));
        }
        filter
    }

    /// Translate this query into an entity-side specification.
    ///
    /// The tag filter targets the junction table, so the `Tags` relation
    /// is included exactly when tag ids are present.
    pub fn to_specification(&self) -> AppResult<Specification<Article>> {
        let criteria = ARTICLE_FIELDS.translate_filter(&self.request_filter())?;
        let mut builder = Specification::builder().criteria(criteria);
        if !self.tag_ids.is_empty() {
            builder = builder.include(ArticleRelation::Tags);
        }
        match self.sorting {
            SortOrder::None => {}
            SortOrder::Ascending => {
                builder = builder.sort(ArticleSortKey::Name.to_sort(SortDirection::Asc));
            }
            SortOrder::Descending => {
                builder = builder.sort(ArticleSortKey::Name.to_sort(SortDirection::Desc));
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikidocs_core::types::filter::{FilterOp, FilterValue};

    #[test]
    fn test_empty_query_matches_everything() {
        let spec = ArticleQuery::default().to_specification().unwrap();
        assert!(spec.criteria().is_empty());
        assert!(spec.includes().is_empty());
        assert!(spec.sort().is_none());
    }

    #[test]
    fn test_part_name_becomes_ilike_on_name() {
        let query = ArticleQuery {
            part_name: Some("Recipe".to_string()),
            ..Default::default()
        };
        let spec = query.to_specification().unwrap();
        let condition = &spec.criteria().conditions()[0];
        assert_eq!(condition.field, "name");
        assert_eq!(condition.op, FilterOp::ILike);
        assert_eq!(condition.value, FilterValue::String("%Recipe%".into()));
    }

    #[test]
    fn test_blank_part_name_is_ignored() {
        let query = ArticleQuery {
            part_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.to_specification().unwrap().criteria().is_empty());
    }

    #[test]
    fn test_tag_filter_includes_junction_relation() {
        let query = ArticleQuery {
            tag_ids: vec![4, 5],
            ..Default::default()
        };
        let spec = query.to_specification().unwrap();
        assert_eq!(spec.includes(), &[ArticleRelation::Tags]);
        let condition = &spec.criteria().conditions()[0];
        assert_eq!(condition.field, "article_tags.tag_id");
        assert_eq!(condition.value, FilterValue::IntList(vec![4, 5]));
    }

    #[test]
    fn test_tag_filtered_query_supports_existence_checks() {
        let query = ArticleQuery {
            tag_ids: vec![4],
            ..Default::default()
        };
        let spec = query.to_specification().unwrap();
        let qb = wikidocs_database::evaluator::exists_query(&spec).unwrap();
        assert!(qb.into_sql().contains("LEFT JOIN article_tags"));
    }

    #[test]
    fn test_category_filter_stays_on_base_table() {
        let query = ArticleQuery {
            category_ids: vec![2],
            ..Default::default()
        };
        let spec = query.to_specification().unwrap();
        assert!(spec.includes().is_empty());
        assert_eq!(spec.criteria().conditions()[0].field, "category_id");
    }

    #[test]
    fn test_sorting_maps_to_name_column() {
        let query = ArticleQuery {
            sorting: SortOrder::Descending,
            ..Default::default()
        };
        let sort = query.to_specification().unwrap().sort().cloned().unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_sort_key_translation() {
        let sort = ArticleSortKey::CreatedAt.to_sort(SortDirection::Asc);
        assert_eq!(sort.field, "created_at");
    }

    #[test]
    fn test_page_request_defaults_and_clamps() {
        let request = ArticleQuery::default().page_request();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 10);

        let oversized = ArticleQuery {
            page: 3,
            page_size: 100_000,
            ..Default::default()
        }
        .page_request();
        assert_eq!(oversized.page_size, 100);
    }
}
