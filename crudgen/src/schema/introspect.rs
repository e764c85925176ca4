//! Live schema introspection
//!
//! Reads every table and its columns from the connected database using
//! `sqlite_master` + `PRAGMA table_info` (SQLite) or `information_schema`
//! (PostgreSQL). The result is a [`SchemaCatalog`] snapshot; the pool is
//! closed before returning.

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{PgPool, Row, SqlitePool};

use super::{Column, ColumnType, SchemaCatalog, TableSchema};
use crate::error::{CrudError, Result};

/// Database dialect, selected by URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// `sqlite:` URLs
    Sqlite,
    /// `postgres://` and `postgresql://` URLs
    Postgres,
}

impl DatabaseKind {
    /// Detect the dialect of a connection URL
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnsupportedDatabase`] for any other scheme.
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else {
            Err(CrudError::UnsupportedDatabase(redact(url)))
        }
    }
}

const SQLITE_TABLES: &str = r"
SELECT name
FROM sqlite_master
WHERE type = 'table'
  AND name NOT LIKE 'sqlite_%'
ORDER BY name
";

const POSTGRES_TABLES: &str = r"
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = current_schema()
  AND table_type = 'BASE TABLE'
ORDER BY table_name
";

const POSTGRES_COLUMNS: &str = r"
SELECT
    c.column_name::text AS column_name,
    c.data_type::text AS data_type,
    c.is_nullable::text AS is_nullable,
    c.character_maximum_length::int4 AS max_length,
    (pk.column_name IS NOT NULL) AS is_primary_key
FROM information_schema.columns c
LEFT JOIN (
    SELECT kcu.table_name, kcu.column_name
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
        ON tc.constraint_name = kcu.constraint_name
        AND tc.table_schema = kcu.table_schema
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND tc.table_schema = current_schema()
) pk ON pk.table_name = c.table_name AND pk.column_name = c.column_name
WHERE c.table_schema = current_schema()
  AND c.table_name = $1
ORDER BY c.ordinal_position
";

/// Fetch every table of the database at `url`
///
/// # Errors
///
/// Returns an error if:
/// - The URL scheme is not supported
/// - The database cannot be reached
/// - A metadata query fails
#[tracing::instrument(skip(url), fields(kind))]
pub async fn load_catalog(url: &str) -> Result<SchemaCatalog> {
    let kind = DatabaseKind::from_url(url)?;
    tracing::Span::current().record("kind", tracing::field::debug(kind));

    let tables = match kind {
        DatabaseKind::Sqlite => {
            let pool = SqlitePoolOptions::new().max_connections(1).connect(url).await?;
            let tables = sqlite_tables(&pool).await;
            pool.close().await;
            tables?
        }
        DatabaseKind::Postgres => {
            let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
            let tables = postgres_tables(&pool).await;
            pool.close().await;
            tables?
        }
    };

    tracing::info!(tables = tables.len(), "schema catalog loaded");
    Ok(SchemaCatalog::new(tables))
}

/// Read all tables of a SQLite database
///
/// # Errors
///
/// Returns an error if a metadata query fails.
pub async fn sqlite_tables(pool: &SqlitePool) -> Result<Vec<TableSchema>> {
    let names: Vec<String> = sqlx::query_scalar(SQLITE_TABLES).fetch_all(pool).await?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let pragma = format!("PRAGMA table_info(\"{}\")", name.replace('"', "\"\""));
        let rows = sqlx::query(&pragma).fetch_all(pool).await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let column_name: String = row.try_get("name")?;
            let declared: String = row.try_get("type")?;
            let not_null: i64 = row.try_get("notnull")?;
            let pk: i64 = row.try_get("pk")?;

            let mut column = Column::from_declared(column_name, &declared);
            column.allow_null = not_null == 0;
            column.is_primary_key = pk > 0;
            columns.push(column);
        }

        tracing::debug!(table = %name, columns = columns.len(), "introspected table");
        tables.push(TableSchema::new(name, columns));
    }

    Ok(tables)
}

/// Read all tables of the current PostgreSQL schema
///
/// # Errors
///
/// Returns an error if a metadata query fails.
pub async fn postgres_tables(pool: &PgPool) -> Result<Vec<TableSchema>> {
    let names: Vec<String> = sqlx::query_scalar(POSTGRES_TABLES).fetch_all(pool).await?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let rows = sqlx::query(POSTGRES_COLUMNS)
            .bind(&name)
            .fetch_all(pool)
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let column_name: String = row.try_get("column_name")?;
            let data_type: String = row.try_get("data_type")?;
            let is_nullable: String = row.try_get("is_nullable")?;
            let max_length: Option<i32> = row.try_get("max_length")?;
            let is_primary_key: bool = row.try_get("is_primary_key")?;

            let column_type = ColumnType::from_sql(&data_type);
            let mut column = Column::new(column_name, column_type);
            column.allow_null = is_nullable == "YES";
            column.is_primary_key = is_primary_key;
            if column_type.is_string_like() {
                column.size = max_length.and_then(|len| u32::try_from(len).ok());
            }
            columns.push(column);
        }

        tracing::debug!(table = %name, columns = columns.len(), "introspected table");
        tables.push(TableSchema::new(name, columns));
    }

    Ok(tables)
}

/// Strip credentials from a URL before it ends up in an error message
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
