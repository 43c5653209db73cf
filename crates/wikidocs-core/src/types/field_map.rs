//! Request-field to entity-column mapping.
//!
//! Services accept filters phrased over request/DTO field names. A
//! [`FieldMap`] is the static table that rewrites those conditions onto
//! entity columns before they reach the repository. A field with no
//! mapping fails here, at translation time, never at query execution.

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::filter::{Condition, Filter};
use crate::types::sorting::Sort;

/// A static table of `(request_field, entity_column)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// Create a field map from a static entry table.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve a request field name to its entity column.
    pub fn resolve(&self, field: &str) -> AppResult<&'static str> {
        self.entries
            .iter()
            .find(|(from, _)| *from == field)
            .map(|(_, to)| *to)
            .ok_or_else(|| {
                AppError::translation(format!(
                    "Field '{field}' has no entity column mapping"
                ))
            })
    }

    /// Rewrite a single condition onto the entity column.
    pub fn translate(&self, condition: &Condition) -> AppResult<Condition> {
        Ok(Condition::new(
            self.resolve(&condition.field)?,
            condition.op,
            condition.value.clone(),
        ))
    }

    /// Rewrite every condition of a filter onto entity columns.
    ///
    /// Fails on the first unmapped field; no partially translated filter
    /// is ever produced.
    pub fn translate_filter(&self, filter: &Filter) -> AppResult<Filter> {
        let mut translated = Filter::new();
        for condition in filter.conditions() {
            translated = translated.and(self.translate(condition)?);
        }
        Ok(translated)
    }

    /// Rewrite a sort onto the entity column.
    pub fn translate_sort(&self, sort: &Sort) -> AppResult<Sort> {
        Ok(Sort::new(self.resolve(&sort.field)?, sort.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::filter::{FilterOp, FilterValue};
    use crate::types::sorting::SortDirection;

    const MAP: FieldMap = FieldMap::new(&[
        ("id", "id"),
        ("part_name", "name"),
        ("category_ids", "category_id"),
    ]);

    #[test]
    fn test_resolve_known_field() {
        assert_eq!(MAP.resolve("part_name").unwrap(), "name");
    }

    #[test]
    fn test_unmapped_field_fails_at_translation_time() {
        let err = MAP.resolve("owner").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Translation);
    }

    #[test]
    fn test_translate_filter_rewrites_fields_only() {
        let filter = Filter::new()
            .and(Condition::ilike("part_name", "%recipe%"))
            .and(Condition::in_ints("category_ids", vec![1, 2]));

        let translated = MAP.translate_filter(&filter).unwrap();
        let conditions = translated.conditions();
        assert_eq!(conditions[0].field, "name");
        assert_eq!(conditions[0].op, FilterOp::ILike);
        assert_eq!(conditions[1].field, "category_id");
        assert_eq!(conditions[1].value, FilterValue::IntList(vec![1, 2]));
    }

    #[test]
    fn test_translate_filter_fails_atomically() {
        let filter = Filter::new()
            .and(Condition::eq("part_name", "x"))
            .and(Condition::eq("unknown", "y"));
        assert!(MAP.translate_filter(&filter).is_err());
    }

    #[test]
    fn test_translate_sort() {
        let sort = MAP
            .translate_sort(&Sort::desc("part_name"))
            .unwrap();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    /// A filter over request fields `{id, part_name}` must match exactly
    /// the rows the translated entity filter matches when the fields carry
    /// equal values under both namings.
    #[test]
    fn test_translation_preserves_match_semantics() {
        let request_side = |field: &str| match field {
            "id" => Some(FilterValue::Integer(7)),
            "part_name" => Some(FilterValue::String("Recipe1".into())),
            _ => None,
        };
        let entity_side = |field: &str| match field {
            "id" => Some(FilterValue::Integer(7)),
            "name" => Some(FilterValue::String("Recipe1".into())),
            _ => None,
        };

        for filter in [
            Filter::new()
                .and(Condition::eq_int("id", 7))
                .and(Condition::ilike("part_name", "%recipe%")),
            Filter::from(Condition::eq("part_name", "Recipe1")),
            Filter::from(Condition::eq_int("id", 8)),
        ] {
            let translated = MAP.translate_filter(&filter).unwrap();
            assert_eq!(
                filter.matches(&request_side),
                translated.matches(&entity_side),
                "translation changed match outcome for {filter:?}"
            );
        }
    }
}
