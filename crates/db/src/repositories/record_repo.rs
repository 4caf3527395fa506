//! Table-agnostic record store over PostgreSQL.
//!
//! Every managed table is read and written through the same four statements
//! (page, point lookup, insert, update) built from the entity kind's column
//! list. Rows travel as `jsonb` so one implementation serves every table;
//! writes go through `jsonb_populate_record`, which lets Postgres coerce each
//! JSON value to the column's declared type.

use std::marker::PhantomData;

use async_trait::async_trait;
use atelier_core::query::ListQuery;
use atelier_core::types::Row;
use serde_json::Value;
use sqlx::types::Json;

use crate::capability::{Capability, Credential, Elevated};
use crate::error::StoreError;
use crate::repositories::sql::{
    bind_values, build_list_filter, column_list, into_row, order_clause, parse_id, quote_ident,
    row_object,
};
use crate::repositories::{ActivityLogRepo, AdminProfileRepo};
use crate::store::{RecordReader, RecordWriter};
use crate::{create_pool, health_check, DbPool};

/// A pool opened with credential tier `C`.
#[derive(Debug, Clone)]
pub struct PgRecordStore<C: Capability> {
    pool: DbPool,
    _tier: PhantomData<C>,
}

impl<C: Capability> PgRecordStore<C> {
    /// Open a pool for `credential`.
    pub async fn connect(
        credential: &Credential<C>,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let pool = create_pool(credential.url(), max_connections).await?;
        tracing::info!(tier = C::NAME, max_connections, "Record store connected");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool. The caller vouches that the pool's login
    /// matches tier `C`.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            pool,
            _tier: PhantomData,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl PgRecordStore<Elevated> {
    /// Admin profile lookups share the elevated pool.
    pub fn admin_directory(&self) -> AdminProfileRepo {
        AdminProfileRepo::new(self.pool.clone())
    }

    /// Activity appends share the elevated pool.
    pub fn activity_log(&self) -> ActivityLogRepo {
        ActivityLogRepo::new(self.pool.clone())
    }
}

#[async_trait]
impl<C: Capability> RecordReader for PgRecordStore<C> {
    async fn select_page(
        &self,
        table: &str,
        columns: &[&str],
        query: &ListQuery,
    ) -> Result<(Vec<Row>, u64), StoreError> {
        let table = quote_ident(table);
        let (where_clause, binds, bind_idx) = build_list_filter(query);

        let count_sql = format!("SELECT COUNT(*)::BIGINT FROM {table} {where_clause}");
        let total = bind_values(sqlx::query_scalar::<_, i64>(&count_sql), &binds)
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {} FROM {table} {where_clause} {} LIMIT ${bind_idx} OFFSET ${}",
            row_object(columns),
            order_clause(&query.sort),
            bind_idx + 1
        );
        let limit = i64::from(query.window.limit);
        let offset = i64::try_from(query.window.offset()).unwrap_or(i64::MAX);
        let rows = bind_values(sqlx::query_scalar::<_, Json<Value>>(&page_sql), &binds)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let rows = rows
            .into_iter()
            .map(|Json(v)| into_row(v))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, u64::try_from(total).unwrap_or_default()))
    }

    async fn find_by_id(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
    ) -> Result<Option<Row>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let query = format!(
            "SELECT {} FROM {} WHERE \"id\" = $1",
            row_object(columns),
            quote_ident(table)
        );
        sqlx::query_scalar::<_, Json<Value>>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|Json(v)| into_row(v))
            .transpose()
    }

    async fn slug_exists(
        &self,
        table: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, StoreError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE \"slug\" = $1 \
             AND ($2::uuid IS NULL OR \"id\" <> $2))",
            quote_ident(table)
        );
        let exists = sqlx::query_scalar::<_, bool>(&query)
            .bind(slug)
            .bind(exclude_id.and_then(parse_id))
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordWriter for PgRecordStore<Elevated> {
    async fn insert(&self, table: &str, columns: &[&str], data: &Row) -> Result<Row, StoreError> {
        let target = quote_ident(table);
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();

        let query = if keys.is_empty() {
            format!(
                "INSERT INTO {target} DEFAULT VALUES RETURNING {}",
                row_object(columns)
            )
        } else {
            format!(
                "INSERT INTO {target} ({}) \
                 SELECT {} FROM jsonb_populate_record(NULL::{target}, $1::jsonb) AS src \
                 RETURNING {}",
                column_list(&keys, None),
                column_list(&keys, Some("src")),
                row_object(columns)
            )
        };

        let mut q = sqlx::query_scalar::<_, Json<Value>>(&query);
        if !keys.is_empty() {
            q = q.bind(Json(Value::Object(data.clone())));
        }
        let Json(row) = q.fetch_one(&self.pool).await?;
        into_row(row)
    }

    async fn update(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
        data: &Row,
    ) -> Result<Option<Row>, StoreError> {
        if data.is_empty() {
            return self.find_by_id(table, columns, id).await;
        }

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let target = quote_ident(table);
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        let query = format!(
            "UPDATE {target} SET ({}) = \
                (SELECT {} FROM jsonb_populate_record(NULL::{target}, $2::jsonb) AS src) \
             WHERE \"id\" = $1 \
             RETURNING {}",
            column_list(&keys, None),
            column_list(&keys, Some("src")),
            row_object(columns)
        );

        sqlx::query_scalar::<_, Json<Value>>(&query)
            .bind(id)
            .bind(Json(Value::Object(data.clone())))
            .fetch_optional(&self.pool)
            .await?
            .map(|Json(v)| into_row(v))
            .transpose()
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let query = format!("DELETE FROM {} WHERE \"id\" = $1", quote_ident(table));
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
