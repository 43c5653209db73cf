//! Specification evaluation: declarative query objects to SQL.
//!
//! Free functions that apply a [`Specification`] to a
//! [`sqlx::QueryBuilder`] in the fixed sequence criteria, includes, sort.
//! Includes are rendered as LEFT JOINs and change only the query shape;
//! the projection stays on the base table (made DISTINCT when joins are
//! present, so join fan-out never widens the result set). Every field
//! name is checked against the entity's column allow-list before it is
//! spliced into SQL; an unknown field fails here with
//! [`ErrorKind::Translation`], never at query execution. Sorts accept
//! base-table columns only, since the DISTINCT projection carries
//! nothing else.

use sqlx::{Postgres, QueryBuilder};

use wikidocs_core::error::{AppError, ErrorKind};
use wikidocs_core::result::AppResult;
use wikidocs_core::traits::{Entity, EntityRelation, SqlValue};
use wikidocs_core::types::filter::{Condition, Filter, FilterOp, FilterValue};
use wikidocs_core::types::sorting::Sort;
use wikidocs_core::types::specification::Specification;

/// Build a `SELECT` for all rows matched by a specification.
pub fn select_query<E: Entity>(
    spec: &Specification<E>,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let projection = if spec.includes().is_empty() {
        format!("SELECT {t}.* FROM {t}", t = E::TABLE)
    } else {
        format!("SELECT DISTINCT {t}.* FROM {t}", t = E::TABLE)
    };
    let mut qb = QueryBuilder::new(projection);
    push_joins(&mut qb, spec.includes());
    push_filter::<E>(&mut qb, spec.criteria(), spec.includes())?;
    push_sort::<E>(&mut qb, spec.sort())?;
    Ok(qb)
}

/// Build a `SELECT COUNT` for the rows matched by a specification.
///
/// Counts distinct base-table ids when joins are present, so the total
/// agrees with [`select_query`].
pub fn count_query<E: Entity>(
    spec: &Specification<E>,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let projection = if spec.includes().is_empty() {
        format!("SELECT COUNT(*) FROM {t}", t = E::TABLE)
    } else {
        format!("SELECT COUNT(DISTINCT {t}.id) FROM {t}", t = E::TABLE)
    };
    let mut qb = QueryBuilder::new(projection);
    push_joins(&mut qb, spec.includes());
    push_filter::<E>(&mut qb, spec.criteria(), spec.includes())?;
    Ok(qb)
}

/// Build a plain filtered `SELECT` without relation includes.
pub fn filtered_select<E: Entity>(
    filter: &Filter,
    sort: Option<&Sort>,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT {t}.* FROM {t}", t = E::TABLE));
    push_filter::<E>(&mut qb, filter, &[])?;
    push_sort::<E>(&mut qb, sort)?;
    Ok(qb)
}

/// Build a `DELETE` removing at most one matched row.
///
/// The LIMIT 1 subselect caps the removal regardless of how many rows
/// the filter matches.
pub fn remove_first_query<E: Entity>(
    filter: &Filter,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!(
        "DELETE FROM {t} WHERE id IN (SELECT {t}.id FROM {t}",
        t = E::TABLE
    ));
    push_filter::<E>(&mut qb, filter, &[])?;
    qb.push(" LIMIT 1)");
    Ok(qb)
}

/// Build a `SELECT EXISTS` for an existence check without materializing
/// any matched rows.
///
/// Included relations are joined, so criteria on junction columns work
/// here the same as in [`select_query`]. The specification's sort is
/// ignored: existence has no order.
pub fn exists_query<E: Entity>(
    spec: &Specification<E>,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT EXISTS (SELECT 1 FROM {t}", t = E::TABLE));
    push_joins(&mut qb, spec.includes());
    push_filter::<E>(&mut qb, spec.criteria(), spec.includes())?;
    qb.push(")");
    Ok(qb)
}

/// Append the JOIN clause of every included relation.
fn push_joins<R: EntityRelation>(qb: &mut QueryBuilder<'static, Postgres>, includes: &[R]) {
    for relation in includes {
        qb.push(" ");
        qb.push(relation.join_clause());
    }
}

/// Append a `WHERE` clause rendering every condition of the filter,
/// ANDed together. An empty filter appends nothing.
fn push_filter<E: Entity>(
    qb: &mut QueryBuilder<'static, Postgres>,
    filter: &Filter,
    includes: &[E::Relation],
) -> AppResult<()> {
    if filter.is_empty() {
        return Ok(());
    }
    qb.push(" WHERE ");
    for (i, condition) in filter.conditions().iter().enumerate() {
        if i > 0 {
            qb.push(" AND ");
        }
        push_condition::<E>(qb, condition, includes)?;
    }
    Ok(())
}

/// Append an `ORDER BY` clause, if a sort is given.
///
/// Sorts are restricted to base-table columns: the DISTINCT projection
/// used under joins only carries base columns, and PostgreSQL requires
/// ORDER BY expressions to appear in a DISTINCT select list.
fn push_sort<E: Entity>(
    qb: &mut QueryBuilder<'static, Postgres>,
    sort: Option<&Sort>,
) -> AppResult<()> {
    if let Some(sort) = sort {
        if !E::COLUMNS.contains(&sort.field.as_str()) {
            return Err(AppError::new(
                ErrorKind::Translation,
                format!(
                    "Sort field '{}' is not a column of table '{}'",
                    sort.field,
                    E::TABLE
                ),
            ));
        }
        qb.push(format!(
            " ORDER BY {}.{} {}",
            E::TABLE,
            sort.field,
            sort.direction.as_sql()
        ));
    }
    Ok(())
}

/// Render one condition, binding its value.
fn push_condition<E: Entity>(
    qb: &mut QueryBuilder<'static, Postgres>,
    condition: &Condition,
    includes: &[E::Relation],
) -> AppResult<()> {
    let column = resolve_column::<E>(&condition.field, includes)?;
    match condition.op {
        FilterOp::IsNull => {
            qb.push(format!("{column} IS NULL"));
        }
        FilterOp::IsNotNull => {
            qb.push(format!("{column} IS NOT NULL"));
        }
        FilterOp::In => {
            qb.push(format!("{column} = ANY("));
            match &condition.value {
                FilterValue::IntList(values) => {
                    qb.push_bind(values.clone());
                }
                FilterValue::StringList(values) => {
                    qb.push_bind(values.clone());
                }
                other => {
                    return Err(list_value_error(&condition.field, other));
                }
            }
            qb.push(")");
        }
        op => {
            qb.push(format!("{column} {} ", scalar_op_sql(op)));
            match &condition.value {
                FilterValue::String(value) => {
                    qb.push_bind(value.clone());
                }
                FilterValue::Integer(value) => {
                    qb.push_bind(*value);
                }
                FilterValue::Boolean(value) => {
                    qb.push_bind(*value);
                }
                other => {
                    return Err(scalar_value_error(&condition.field, other));
                }
            }
        }
    }
    Ok(())
}

/// Resolve a filter field name to a qualified column, or fail with a
/// translation error.
///
/// Own columns are qualified with the entity table. Columns contributed
/// by an included relation must already be qualified and are accepted
/// verbatim; a joined column without its relation included is rejected.
/// Sort fields go through the stricter base-column check in `push_sort`.
fn resolve_column<E: Entity>(field: &str, includes: &[E::Relation]) -> AppResult<String> {
    if E::COLUMNS.contains(&field) {
        return Ok(format!("{}.{field}", E::TABLE));
    }
    if includes
        .iter()
        .any(|relation| relation.columns().contains(&field))
    {
        return Ok(field.to_string());
    }
    Err(AppError::new(
        ErrorKind::Translation,
        format!("Unknown query field '{field}' for table '{}'", E::TABLE),
    ))
}

/// SQL operator token for a scalar comparison.
fn scalar_op_sql(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Eq => "=",
        FilterOp::Ne => "<>",
        FilterOp::Gt => ">",
        FilterOp::Gte => ">=",
        FilterOp::Lt => "<",
        FilterOp::Lte => "<=",
        FilterOp::Like => "LIKE",
        FilterOp::ILike => "ILIKE",
        FilterOp::In | FilterOp::IsNull | FilterOp::IsNotNull => unreachable!(),
    }
}

fn list_value_error(field: &str, value: &FilterValue) -> AppError {
    AppError::new(
        ErrorKind::Translation,
        format!("Operator In on field '{field}' requires a list value, got {value:?}"),
    )
}

fn scalar_value_error(field: &str, value: &FilterValue) -> AppError {
    AppError::new(
        ErrorKind::Translation,
        format!("Scalar operator on field '{field}' cannot bind {value:?}"),
    )
}

/// Bind one entity column value, dispatching on its SQL type.
pub(crate) fn push_sql_value(qb: &mut QueryBuilder<'static, Postgres>, value: SqlValue) {
    match value {
        SqlValue::Int(v) => {
            qb.push_bind(v);
        }
        SqlValue::Text(v) => {
            qb.push_bind(v);
        }
        SqlValue::OptText(v) => {
            qb.push_bind(v);
        }
        SqlValue::Timestamp(v) => {
            qb.push_bind(v);
        }
        SqlValue::OptTimestamp(v) => {
            qb.push_bind(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikidocs_entity::article::ArticleRelation;
    use wikidocs_entity::{Article, Category};

    fn sql(qb: QueryBuilder<'static, Postgres>) -> String {
        qb.into_sql()
    }

    #[test]
    fn test_plain_select_has_no_where_or_order() {
        let spec = Specification::<Category>::all();
        assert_eq!(sql(select_query(&spec).unwrap()), "SELECT categories.* FROM categories");
    }

    #[test]
    fn test_filter_then_sort_order() {
        let spec = Specification::<Category>::builder()
            .criteria(Filter::from(Condition::ilike("name", "%kitchen%")))
            .sort(Sort::asc("name"))
            .build()
            .unwrap();
        assert_eq!(
            sql(select_query(&spec).unwrap()),
            "SELECT categories.* FROM categories WHERE categories.name ILIKE $1 \
             ORDER BY categories.name ASC"
        );
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let spec = Specification::<Article>::of(
            Filter::new()
                .and(Condition::eq_int("category_id", 2))
                .and(Condition::ilike("name", "%recipe%")),
        );
        let text = sql(select_query(&spec).unwrap());
        assert!(text.contains("WHERE articles.category_id = $1 AND articles.name ILIKE $2"));
    }

    #[test]
    fn test_includes_add_joins_and_distinct() {
        let spec = Specification::<Article>::builder()
            .include(ArticleRelation::Tags)
            .criteria(Filter::from(Condition::in_ints(
                "article_tags.tag_id",
                vec![1, 2],
            )))
            .build()
            .unwrap();
        let text = sql(select_query(&spec).unwrap());
        assert!(text.starts_with("SELECT DISTINCT articles.* FROM articles"));
        assert!(text.contains("LEFT JOIN article_tags ON article_tags.article_id = articles.id"));
        assert!(text.contains("article_tags.tag_id = ANY($1)"));
    }

    #[test]
    fn test_duplicate_include_joins_once() {
        let spec = Specification::<Article>::builder()
            .include(ArticleRelation::Category)
            .include(ArticleRelation::Category)
            .build()
            .unwrap();
        let text = sql(select_query(&spec).unwrap());
        assert_eq!(text.matches("LEFT JOIN categories").count(), 1);
    }

    #[test]
    fn test_unknown_field_fails_before_execution() {
        let spec = Specification::<Category>::of(Filter::from(Condition::eq("owner", "x")));
        let err = select_query(&spec).err().unwrap();
        assert_eq!(err.kind, ErrorKind::Translation);
    }

    #[test]
    fn test_joined_column_requires_its_include() {
        let spec = Specification::<Article>::of(Filter::from(Condition::in_ints(
            "article_tags.tag_id",
            vec![1],
        )));
        assert_eq!(
            select_query(&spec).err().unwrap().kind,
            ErrorKind::Translation
        );
    }

    #[test]
    fn test_in_requires_list_value() {
        let spec = Specification::<Category>::of(Filter::from(Condition::new(
            "id",
            FilterOp::In,
            FilterValue::Integer(1),
        )));
        assert_eq!(
            select_query(&spec).err().unwrap().kind,
            ErrorKind::Translation
        );
    }

    #[test]
    fn test_sort_on_joined_column_is_rejected() {
        let spec = Specification::<Article>::builder()
            .include(ArticleRelation::Tags)
            .sort(Sort::asc("tags.name"))
            .build()
            .unwrap();
        let err = select_query(&spec).err().unwrap();
        assert_eq!(err.kind, ErrorKind::Translation);
    }

    #[test]
    fn test_null_checks_bind_nothing() {
        let spec = Specification::<Category>::of(Filter::from(Condition::new(
            "modified_by",
            FilterOp::IsNull,
            FilterValue::Null,
        )));
        assert_eq!(
            sql(select_query(&spec).unwrap()),
            "SELECT categories.* FROM categories WHERE categories.modified_by IS NULL"
        );
    }

    #[test]
    fn test_count_query_counts_distinct_ids_under_joins() {
        let spec = Specification::<Article>::builder()
            .include(ArticleRelation::Tags)
            .build()
            .unwrap();
        let text = sql(count_query(&spec).unwrap());
        assert!(text.starts_with("SELECT COUNT(DISTINCT articles.id) FROM articles"));

        let plain = Specification::<Article>::all();
        assert_eq!(
            sql(count_query(&plain).unwrap()),
            "SELECT COUNT(*) FROM articles"
        );
    }

    #[test]
    fn test_remove_first_caps_deletion_at_one_row() {
        let filter = Filter::from(Condition::eq_int("category_id", 2));
        assert_eq!(
            sql(remove_first_query::<Article>(&filter).unwrap()),
            "DELETE FROM articles WHERE id IN \
             (SELECT articles.id FROM articles WHERE articles.category_id = $1 LIMIT 1)"
        );
    }

    #[test]
    fn test_exists_query_shape() {
        let spec =
            Specification::<Category>::of(Filter::from(Condition::eq("name", "Kitchen")));
        assert_eq!(
            sql(exists_query(&spec).unwrap()),
            "SELECT EXISTS (SELECT 1 FROM categories WHERE categories.name = $1)"
        );
    }

    #[test]
    fn test_exists_joins_included_relations() {
        let spec = Specification::<Article>::builder()
            .include(ArticleRelation::Tags)
            .criteria(Filter::from(Condition::in_ints(
                "article_tags.tag_id",
                vec![4, 5],
            )))
            .build()
            .unwrap();
        let text = sql(exists_query(&spec).unwrap());
        assert!(text.starts_with("SELECT EXISTS (SELECT 1 FROM articles LEFT JOIN article_tags"));
        assert!(text.contains("article_tags.tag_id = ANY($1)"));
        assert!(text.ends_with(")"));
    }

    #[test]
    fn test_filtered_select_with_sort() {
        let filter = Filter::from(Condition::eq_int("id", 3));
        let sort = Sort::desc("created_at");
        assert_eq!(
            sql(filtered_select::<Article>(&filter, Some(&sort)).unwrap()),
            "SELECT articles.* FROM articles WHERE articles.id = $1 \
             ORDER BY articles.created_at DESC"
        );
    }
}
