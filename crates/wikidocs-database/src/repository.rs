//! Generic entity repository.
//!
//! One type-parameterized data-access component reused by every entity.
//! Entity-specific queries (relation hydration, junction writes) live in
//! [`crate::relations`]; everything else goes through here.
//!
//! This is the single error boundary for provider failures: every sqlx
//! error is wrapped exactly once into [`ErrorKind::Database`] carrying
//! the entity table and the failed operation, with the original error
//! preserved as the source. Callers never see a raw `sqlx::Error`.

use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use wikidocs_core::error::{AppError, ErrorKind};
use wikidocs_core::result::AppResult;
use wikidocs_core::traits::Entity;
use wikidocs_core::types::filter::Filter;
use wikidocs_core::types::pagination::{PageRequest, PageResponse};
use wikidocs_core::types::sorting::Sort;
use wikidocs_core::types::specification::Specification;

use crate::evaluator;

/// Generic repository over a PostgreSQL pool for entity type `E`.
#[derive(Debug)]
pub struct Repository<E: Entity> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// List all entities matching a filter, optionally sorted.
    ///
    /// Read-only; without a sort the row order is store-defined.
    pub async fn get(&self, filter: &Filter, sort: Option<&Sort>) -> AppResult<Vec<E>> {
        let mut qb = evaluator::filtered_select::<E>(filter, sort)?;
        qb.build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::db_error("get"))
    }

    /// Return the first entity matching a specification, or `None`.
    ///
    /// An absent match is a valid outcome, not an error. Includes are
    /// joined, so criteria on junction columns are honored.
    pub async fn first_or_default(&self, spec: &Specification<E>) -> AppResult<Option<E>> {
        let mut qb = evaluator::select_query::<E>(spec)?;
        qb.push(" LIMIT 1");
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_error("first_or_default"))
    }

    /// Check whether any entity matches a specification, without
    /// materializing matches.
    pub async fn any(&self, spec: &Specification<E>) -> AppResult<bool> {
        let mut qb = evaluator::exists_query::<E>(spec)?;
        qb.build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(Self::db_error("any"))
    }

    /// Insert an entity and return it with the store-assigned id.
    ///
    /// The returned value is detached: mutating it has no effect on the
    /// store until it is passed to [`Repository::update`].
    pub async fn add(&self, entity: &E) -> AppResult<E> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (", E::TABLE));
        for (i, column) in E::DATA_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column);
        }
        qb.push(") VALUES (");
        for (i, value) in entity.bind_values().into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            evaluator::push_sql_value(&mut qb, value);
        }
        qb.push(") RETURNING *");

        debug!(table = E::TABLE, "Inserting entity");
        qb.build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(Self::db_error("add"))
    }

    /// Full-record replace by id.
    ///
    /// Fails with [`ErrorKind::NotFound`] when no row matches the
    /// entity's id; nothing is written in that case.
    pub async fn update(&self, entity: &E) -> AppResult<E> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::TABLE));
        let values = entity.bind_values();
        for (i, (column, value)) in E::DATA_COLUMNS.iter().zip(values).enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column);
            qb.push(" = ");
            evaluator::push_sql_value(&mut qb, value);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(entity.id());
        qb.push(" RETURNING *");

        debug!(table = E::TABLE, id = entity.id(), "Updating entity");
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_error("update"))?
            .ok_or_else(|| {
                AppError::not_found(format!("{} {} not found", E::TABLE, entity.id()))
            })
    }

    /// Delete the first row matching a filter. Returns the number of
    /// rows removed (0 or 1).
    ///
    /// At most one row is removed per call even when the filter matches
    /// more; callers wanting bulk deletion must loop explicitly.
    pub async fn remove_first(&self, filter: &Filter) -> AppResult<u64> {
        let mut qb = evaluator::remove_first_query::<E>(filter)?;
        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(Self::db_error("remove_first"))?;
        Ok(result.rows_affected())
    }

    /// Delete the given entity by its id. Returns `false` for an unsaved
    /// entity (`id == 0`) or when no row matches; both are no-ops.
    pub async fn remove(&self, entity: &E) -> AppResult<bool> {
        if entity.id() == 0 {
            return Ok(false);
        }
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(entity.id())
            .execute(&self.pool)
            .await
            .map_err(Self::db_error("remove"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Direct key lookup, bypassing the filter machinery.
    pub async fn find(&self, id: i32) -> AppResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::db_error("find"))
    }

    /// Fetch one page of entities matching a specification.
    ///
    /// The count query and the page slice run concurrently; both must
    /// complete, and either failure fails the whole call.
    pub async fn get_paged(
        &self,
        page: &PageRequest,
        spec: &Specification<E>,
    ) -> AppResult<PageResponse<E>> {
        let count_qb = evaluator::count_query::<E>(spec)?;
        let mut slice_qb = evaluator::select_query::<E>(spec)?;
        slice_qb.push(" LIMIT ");
        slice_qb.push_bind(page.limit() as i64);
        slice_qb.push(" OFFSET ");
        slice_qb.push_bind(page.offset() as i64);

        let count_pool = self.pool.clone();
        let count_fut = async move {
            let mut qb = count_qb;
            qb.build_query_scalar::<i64>().fetch_one(&count_pool).await
        };
        let slice_pool = self.pool.clone();
        let slice_fut = async move {
            let mut qb = slice_qb;
            qb.build_query_as::<E>().fetch_all(&slice_pool).await
        };

        let (total, items) =
            tokio::try_join!(count_fut, slice_fut).map_err(Self::db_error("get_paged"))?;
        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all entities matching a specification, includes applied.
    /// Read-only.
    pub async fn list(&self, spec: &Specification<E>) -> AppResult<Vec<E>> {
        let mut qb = evaluator::select_query::<E>(spec)?;
        qb.build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::db_error("list"))
    }

    /// The uniform provider-error wrapper for this entity type.
    fn db_error(operation: &'static str) -> impl Fn(sqlx::Error) -> AppError {
        move |e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("{} operation '{operation}' failed", E::TABLE),
                e,
            )
        }
    }
}
