//! Filter types for dynamic query building.
//!
//! A [`Filter`] is a conjunctive list of [`Condition`]s over named fields.
//! Filters are declarative: the database crate renders them to SQL, and
//! [`Condition::matches`] evaluates the same semantics in memory so that
//! field-map translation can be verified without a database.

use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `= ANY(...)` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

/// A dynamic filter value that can represent the SQL types used by the
/// WikiDocs schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A list of integer values (for the `In` operator).
    IntList(Vec<i32>),
    /// A list of string values (for the `In` operator).
    StringList(Vec<String>),
    /// Null / no value (for `IsNull`, `IsNotNull`).
    Null,
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl Condition {
    /// Create a new condition.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for a string equality condition.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for an integer equality condition.
    pub fn eq_int(field: impl Into<String>, value: i64) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::Integer(value))
    }

    /// Shorthand for a case-insensitive substring match.
    ///
    /// The pattern is wrapped in `%` wildcards by the caller-facing query
    /// builders; this helper takes the raw pattern as-is.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Shorthand for integer list membership.
    pub fn in_ints(field: impl Into<String>, values: Vec<i32>) -> Self {
        Self::new(field, FilterOp::In, FilterValue::IntList(values))
    }

    /// Evaluate this condition against an in-memory record.
    ///
    /// `lookup` resolves a field name to its current value, or `None` when
    /// the field is absent. Semantics mirror the SQL rendering: `Like` is
    /// case-sensitive substring containment, `ILike` case-insensitive.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<FilterValue>,
    {
        let actual = lookup(&self.field);
        match self.op {
            FilterOp::IsNull => matches!(actual, None | Some(FilterValue::Null)),
            FilterOp::IsNotNull => !matches!(actual, None | Some(FilterValue::Null)),
            _ => {
                let Some(actual) = actual else {
                    return false;
                };
                self.compare(&actual)
            }
        }
    }

    fn compare(&self, actual: &FilterValue) -> bool {
        use FilterOp::*;
        use FilterValue::*;
        match (self.op, actual, &self.value) {
            (Eq, a, e) => a == e,
            (Ne, a, e) => a != e,
            (Gt, Integer(a), Integer(e)) => a > e,
            (Gte, Integer(a), Integer(e)) => a >= e,
            (Lt, Integer(a), Integer(e)) => a < e,
            (Lte, Integer(a), Integer(e)) => a <= e,
            (Like, String(a), String(pattern)) => a.contains(pattern.trim_matches('%')),
            (ILike, String(a), String(pattern)) => a
                .to_lowercase()
                .contains(&pattern.trim_matches('%').to_lowercase()),
            (In, Integer(a), IntList(list)) => list.iter().any(|v| i64::from(*v) == *a),
            (In, String(a), StringList(list)) => list.contains(a),
            _ => false,
        }
    }
}

/// A conjunctive (AND) list of conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Create an empty filter matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from a single condition.
    pub fn from(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
        }
    }

    /// Add a condition, narrowing the match set.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Whether this filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The conditions, in insertion order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate all conditions against an in-memory record.
    ///
    /// An empty filter matches everything.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<FilterValue>,
    {
        self.conditions.iter().all(|c| c.matches(lookup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, id: i64) -> impl Fn(&str) -> Option<FilterValue> {
        let name = name.to_string();
        move |field| match field {
            "name" => Some(FilterValue::String(name.clone())),
            "id" => Some(FilterValue::Integer(id)),
            "modified_by" => Some(FilterValue::Null),
            _ => None,
        }
    }

    #[test]
    fn test_eq_and_ne() {
        let lookup = record("Kitchen", 3);
        assert!(Condition::eq("name", "Kitchen").matches(&lookup));
        assert!(!Condition::eq("name", "Garage").matches(&lookup));
        assert!(Condition::new("id", FilterOp::Ne, FilterValue::Integer(4)).matches(&lookup));
    }

    #[test]
    fn test_ilike_is_case_insensitive() {
        let lookup = record("Slow Cooker Recipes", 1);
        assert!(Condition::ilike("name", "%cooker%").matches(&lookup));
        assert!(!Condition::new(
            "name",
            FilterOp::Like,
            FilterValue::String("%cooker%".into())
        )
        .matches(&lookup));
    }

    #[test]
    fn test_in_list() {
        let lookup = record("x", 7);
        assert!(Condition::in_ints("id", vec![5, 7, 9]).matches(&lookup));
        assert!(!Condition::in_ints("id", vec![1, 2]).matches(&lookup));
    }

    #[test]
    fn test_null_checks() {
        let lookup = record("x", 1);
        assert!(Condition::new("modified_by", FilterOp::IsNull, FilterValue::Null).matches(&lookup));
        assert!(!Condition::new("name", FilterOp::IsNull, FilterValue::Null).matches(&lookup));
        assert!(Condition::new("name", FilterOp::IsNotNull, FilterValue::Null).matches(&lookup));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let lookup = record("x", 1);
        assert!(!Condition::eq("description", "x").matches(&lookup));
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let lookup = record("Kitchen", 3);
        let filter = Filter::new()
            .and(Condition::eq("name", "Kitchen"))
            .and(Condition::eq_int("id", 3));
        assert!(filter.matches(&lookup));

        let narrowed = filter.and(Condition::eq_int("id", 4));
        assert!(!narrowed.matches(&lookup));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches(&record("anything", 0)));
    }

    #[test]
    fn test_comparison_ops() {
        let lookup = record("x", 10);
        assert!(Condition::new("id", FilterOp::Gt, FilterValue::Integer(9)).matches(&lookup));
        assert!(Condition::new("id", FilterOp::Gte, FilterValue::Integer(10)).matches(&lookup));
        assert!(Condition::new("id", FilterOp::Lt, FilterValue::Integer(11)).matches(&lookup));
        assert!(!Condition::new("id", FilterOp::Lte, FilterValue::Integer(9)).matches(&lookup));
    }
}
