use sqlx::{PgPool, Row, SqlitePool, query};

use crate::error::{ClearError, ResetError};
use crate::resolver::TableClearer;
use crate::table::TableName;

/// Store provides an interface to the database under reset (PostgreSQL or SQLite).
#[derive(Clone)]
pub enum Store {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Store {
    /// Open a connection pool for the given DSN.
    ///
    /// A `sqlite:` prefix selects the SQLite backend, anything else is
    /// treated as a PostgreSQL DSN.
    pub async fn connect(dsn: &str) -> Result<Self, sqlx::Error> {
        let store = if dsn.starts_with("sqlite:") {
            let dsn = sqlite_create_mode(dsn);
            SqlitePool::connect(&dsn).await.map(Store::Sqlite)
        } else {
            PgPool::connect(dsn).await.map(Store::Postgres)
        }
        .map_err(|e| {
            log::error!("Store connection for {dsn} failed: {e}");
            e
        })?;

        log::info!("Opened {} store at {dsn}", store.backend());
        Ok(store)
    }

    fn backend(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgresql",
            Store::Sqlite(_) => "sqlite",
        }
    }

    /// List all user tables in the store, ordered by name.
    ///
    /// System and catalog tables are excluded. Failure here is fatal: if the
    /// metadata query cannot run, the suite cannot proceed.
    pub async fn list_tables(&self) -> Result<Vec<TableName>, ResetError> {
        let rows = match self {
            Store::Postgres(pool) => {
                let stmt = r#"
                SELECT table_name::text AS name FROM information_schema.tables
                WHERE table_type = 'BASE TABLE'
                  AND table_schema NOT IN ('pg_catalog', 'information_schema')
                ORDER BY table_name
                "#;
                query(stmt)
                    .fetch_all(pool)
                    .await
                    .map_err(ResetError::CatalogUnavailable)?
                    .into_iter()
                    .map(|row| TableName::from(row.get::<String, _>("name")))
                    .collect::<Vec<_>>()
            }
            Store::Sqlite(pool) => {
                let stmt = r#"
                SELECT name FROM sqlite_master
                WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                ORDER BY name
                "#;
                query(stmt)
                    .fetch_all(pool)
                    .await
                    .map_err(ResetError::CatalogUnavailable)?
                    .into_iter()
                    .map(|row| TableName::from(row.get::<String, _>("name")))
                    .collect::<Vec<_>>()
            }
        };

        log::debug!("Discovered {} user tables", rows.len());
        Ok(rows)
    }

    /// Delete all rows from the named table in a single statement,
    /// returning the number of rows removed.
    pub async fn delete_all_rows(&self, table: &TableName) -> Result<u64, ClearError> {
        let stmt = format!("DELETE FROM {}", quote_ident(table.as_str()));
        let result = match self {
            Store::Postgres(pool) => query(&stmt)
                .execute(pool)
                .await
                .map(|done| done.rows_affected()),
            Store::Sqlite(pool) => query(&stmt)
                .execute(pool)
                .await
                .map(|done| done.rows_affected()),
        };

        result.map_err(classify)
    }
}

#[async_trait::async_trait]
impl TableClearer for Store {
    async fn clear(&self, table: &TableName) -> Result<u64, ClearError> {
        self.delete_all_rows(table).await
    }
}

/// Split a delete failure into retryable and fatal classes.
///
/// `is_foreign_key_violation` covers SQLSTATE 23503 on PostgreSQL and
/// SQLITE_CONSTRAINT_FOREIGNKEY on SQLite; anything the driver does not
/// recognize as a foreign-key violation is treated as fatal.
fn classify(error: sqlx::Error) -> ClearError {
    let referential = matches!(
        &error,
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation()
    );
    if referential {
        ClearError::ReferentialViolation(error)
    } else {
        ClearError::Fatal(error)
    }
}

/// Quote an SQL identifier for both backends.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQLite refuses to open a missing database file unless the DSN asks for
/// read-write-create mode; leave DSNs with an explicit mode untouched.
fn sqlite_create_mode(dsn: &str) -> String {
    if dsn.contains("mode=") {
        return dsn.to_string();
    }
    let separator = if dsn.contains('?') { '&' } else { '?' };
    format!("{dsn}{separator}mode=rwc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_identifiers() {
        assert_eq!(quote_ident("orders"), "\"orders\"");
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn non_database_errors_are_fatal() {
        let classified = classify(sqlx::Error::PoolTimedOut);
        assert!(matches!(classified, ClearError::Fatal(_)));
    }

    #[test]
    fn sqlite_dsn_gains_create_mode() {
        assert_eq!(sqlite_create_mode("sqlite://app.db"), "sqlite://app.db?mode=rwc");
        assert_eq!(
            sqlite_create_mode("sqlite://app.db?cache=shared"),
            "sqlite://app.db?cache=shared&mode=rwc"
        );
    }

    #[test]
    fn explicit_sqlite_mode_is_left_untouched() {
        assert_eq!(sqlite_create_mode("sqlite://app.db?mode=ro"), "sqlite://app.db?mode=ro");
    }
}
