use crate::table::TableName;

/// Outcome of a single table-clear attempt.
///
/// The split between the two variants is what lets the resolver retry only
/// what a later round can actually fix: a foreign-key violation clears up
/// once the referencing tables are emptied, anything else will fail the same
/// way every round.
#[derive(Debug, thiserror::Error)]
pub enum ClearError {
    /// The delete was blocked by rows in other tables that still reference
    /// this one. Expected to succeed in a later round.
    #[error("blocked by rows in referencing tables: {0}")]
    ReferentialViolation(#[source] sqlx::Error),
    /// Any other store failure (permission, connectivity, missing table).
    #[error(transparent)]
    Fatal(sqlx::Error),
}

/// Failure of a reset operation, surfaced to the lifecycle caller.
#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error("failed to connect to store: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("failed to list tables from store metadata: {0}")]
    CatalogUnavailable(#[source] sqlx::Error),
    #[error("failed to clear table \"{table}\": {source}")]
    Fatal {
        table: TableName,
        #[source]
        source: sqlx::Error,
    },
    /// No pending table could be cleared in a full round. Carries every
    /// still-pending table with the last error recorded for it, so the
    /// caller can see which part of the dependency graph never opened up.
    #[error("no clearable table remains after {rounds} round(s); still pending: {}", format_stuck(.stuck))]
    CircularDependency {
        rounds: usize,
        stuck: Vec<(TableName, ClearError)>,
    },
    #[error("table \"{0}\" appears more than once in the configured deletion order")]
    DuplicateTable(TableName),
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

fn format_stuck(stuck: &[(TableName, ClearError)]) -> String {
    stuck
        .iter()
        .map(|(table, error)| format!("{table} ({error})"))
        .collect::<Vec<_>>()
        .join(", ")
}
