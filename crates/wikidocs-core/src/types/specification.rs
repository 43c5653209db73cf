//! Declarative query specifications.
//!
//! A [`Specification`] bundles filter criteria, relation includes, and an
//! optional sort for one entity type. Specifications are immutable values:
//! they are assembled through a consuming [`SpecificationBuilder`] and
//! cannot be mutated after `build()`. The database crate evaluates them
//! against a SQL query builder in the fixed order filter, includes, sort.

use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::filter::Filter;
use crate::types::sorting::Sort;

/// An immutable query specification for entity type `E`.
#[derive(Debug, Clone)]
pub struct Specification<E: Entity> {
    criteria: Filter,
    includes: Vec<E::Relation>,
    sort: Option<Sort>,
}

impl<E: Entity> Specification<E> {
    /// Start building a specification.
    pub fn builder() -> SpecificationBuilder<E> {
        SpecificationBuilder::new()
    }

    /// A specification with criteria only.
    pub fn of(criteria: Filter) -> Self {
        Self {
            criteria,
            includes: Vec::new(),
            sort: None,
        }
    }

    /// A specification matching everything, with no includes or sort.
    pub fn all() -> Self {
        Self::of(Filter::new())
    }

    /// The filter criteria (empty filter matches everything).
    pub fn criteria(&self) -> &Filter {
        &self.criteria
    }

    /// The relations to include, in insertion order, deduplicated.
    pub fn includes(&self) -> &[E::Relation] {
        &self.includes
    }

    /// The sort, if any. Without one, row order is store-defined.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }
}

impl<E: Entity> Default for Specification<E> {
    fn default() -> Self {
        Self::all()
    }
}

/// Consuming builder for [`Specification`].
///
/// Criteria and sort may each be set at most once; a second set is
/// reported as an error from [`SpecificationBuilder::build`]. Includes are
/// append-only and deduplicated.
#[derive(Debug)]
pub struct SpecificationBuilder<E: Entity> {
    criteria: Option<Filter>,
    includes: Vec<E::Relation>,
    sort: Option<Sort>,
    conflict: Option<&'static str>,
}

impl<E: Entity> SpecificationBuilder<E> {
    fn new() -> Self {
        Self {
            criteria: None,
            includes: Vec::new(),
            sort: None,
            conflict: None,
        }
    }

    /// Set the filter criteria. May be called at most once.
    pub fn criteria(mut self, criteria: Filter) -> Self {
        if self.criteria.is_some() {
            self.conflict = Some("criteria set more than once");
        }
        self.criteria = Some(criteria);
        self
    }

    /// Append a relation include. Duplicates are ignored.
    pub fn include(mut self, relation: E::Relation) -> Self {
        if !self.includes.contains(&relation) {
            self.includes.push(relation);
        }
        self
    }

    /// Set the sort. May be called at most once.
    pub fn sort(mut self, sort: Sort) -> Self {
        if self.sort.is_some() {
            self.conflict = Some("sort set more than once");
        }
        self.sort = Some(sort);
        self
    }

    /// Finish building, yielding the immutable specification.
    pub fn build(self) -> AppResult<Specification<E>> {
        if let Some(conflict) = self.conflict {
            return Err(AppError::validation(format!(
                "Invalid specification: {conflict}"
            )));
        }
        Ok(Specification {
            criteria: self.criteria.unwrap_or_default(),
            includes: self.includes,
            sort: self.sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::entity::{NoRelation, SqlValue};
    use crate::types::filter::Condition;
    use crate::types::sorting::Sort;

    #[derive(Debug, Clone, serde::Serialize)]
    struct Probe {
        id: i32,
        name: String,
    }

    impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Probe {
        fn from_row(_row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
            unimplemented!("not used in specification tests")
        }
    }

    impl Entity for Probe {
        const TABLE: &'static str = "probes";
        const COLUMNS: &'static [&'static str] = &["id", "name"];
        const DATA_COLUMNS: &'static [&'static str] = &["name"];
        type Relation = NoRelation;

        fn id(&self) -> i32 {
            self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn bind_values(&self) -> Vec<SqlValue> {
            vec![SqlValue::Text(self.name.clone())]
        }
    }

    #[test]
    fn test_builder_defaults() {
        let spec = Specification::<Probe>::builder().build().unwrap();
        assert!(spec.criteria().is_empty());
        assert!(spec.includes().is_empty());
        assert!(spec.sort().is_none());
    }

    #[test]
    fn test_builder_sets_all_parts() {
        let spec = Specification::<Probe>::builder()
            .criteria(Filter::from(Condition::eq("name", "x")))
            .sort(Sort::asc("name"))
            .build()
            .unwrap();
        assert_eq!(spec.criteria().conditions().len(), 1);
        assert_eq!(spec.sort().unwrap().field, "name");
    }

    #[test]
    fn test_sort_set_twice_is_rejected() {
        let result = Specification::<Probe>::builder()
            .sort(Sort::asc("name"))
            .sort(Sort::desc("id"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_criteria_set_twice_is_rejected() {
        let result = Specification::<Probe>::builder()
            .criteria(Filter::new())
            .criteria(Filter::new())
            .build();
        assert!(result.is_err());
    }
}
