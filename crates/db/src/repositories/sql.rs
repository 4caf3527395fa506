//! Dynamic SQL fragments shared by the record store.
//!
//! Column and table names reaching these helpers are always drawn from an
//! entity kind's static column list; they are still quoted as identifiers.
//! Caller-supplied values only ever travel as bind parameters.

use atelier_core::query::{FilterValue, ListQuery, Sort};
use atelier_core::types::Row;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::Postgres;
use uuid::Uuid;

use crate::error::StoreError;

/// Typed bind value for dynamically-built list queries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    Bool(bool),
    Text(String),
}

/// Quote an identifier, doubling embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"a", "b", "c"`, optionally qualified with a table alias.
pub(crate) fn column_list(columns: &[&str], alias: Option<&str>) -> String {
    columns
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{a}.{}", quote_ident(c)),
            None => quote_ident(c),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `jsonb_build_object('a', "a", ...)`: one JSON object per row, so any
/// table can be read without a per-table `FromRow` type.
pub(crate) fn row_object(columns: &[&str]) -> String {
    let pairs = columns
        .iter()
        .map(|c| format!("'{}', {}", c.replace('\'', "''"), quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("jsonb_build_object({pairs})")
}

/// Build a WHERE clause and bind values from a [`ListQuery`].
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when nothing filters the table, or starts with `WHERE `.
pub(crate) fn build_list_filter(query: &ListQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(search) = &query.search {
        let ors = search
            .columns
            .iter()
            .map(|c| format!("{}::text ILIKE ${bind_idx}", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(" OR ");
        conditions.push(format!("({ors})"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(search.like_pattern()));
    }

    for filter in &query.filters {
        let column = quote_ident(&filter.column);
        match &filter.value {
            FilterValue::Bool(v) => {
                conditions.push(format!("{column} = ${bind_idx}"));
                bind_values.push(BindValue::Bool(*v));
            }
            FilterValue::Text(v) => {
                conditions.push(format!("{column}::text = ${bind_idx}"));
                bind_values.push(BindValue::Text(v.clone()));
            }
        }
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// ORDER BY for a list query. Ties fall back to insertion order.
pub(crate) fn order_clause(sort: &Sort) -> String {
    format!(
        "ORDER BY {} {} NULLS LAST, \"created_at\" ASC, \"id\" ASC",
        quote_ident(&sort.column),
        sort.order.as_sql()
    )
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub(crate) fn bind_values<'q, O>(
    mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}

/// Parse an opaque record id as the UUID primary key. An id that is not a
/// UUID cannot match any row.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Unwrap a `jsonb_build_object` result into a row map.
pub(crate) fn into_row(value: Value) -> Result<Row, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(<serde_json::Error as serde::de::Error>::custom(
            format!("expected a JSON object row, got {other}"),
        ))),
    }
}
