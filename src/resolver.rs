//! Fixpoint resolution of a valid table-deletion order.
//!
//! The resolver knows nothing about the schema's foreign-key graph. It
//! repeatedly attempts to clear every pending table; each round removes the
//! tables whose referencing rows are already gone, so a valid order is
//! discovered by construction. A round that clears nothing means no valid
//! order exists.

use async_trait::async_trait;

use crate::error::{ClearError, ResetError};
use crate::table::TableName;

/// Seam between the resolver and the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableClearer: Send + Sync {
    /// Delete all rows of the named table, returning the rows removed.
    async fn clear(&self, table: &TableName) -> Result<u64, ClearError>;
}

/// Outcome of one resolution round.
///
/// Every attempted table lands in exactly one of `cleared` or `blocked`.
#[derive(Debug)]
pub struct RoundResult {
    pub cleared: Vec<TableName>,
    pub blocked: Vec<(TableName, ClearError)>,
    pub rows_deleted: u64,
}

/// Terminal result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSummary {
    pub rounds: usize,
    pub tables_cleared: usize,
    pub rows_deleted: u64,
}

/// Clear every table in `tables`, discovering a valid deletion order by
/// iterating rounds to a fixpoint.
///
/// The input order is preserved within each round as a scheduling hint; it
/// never affects correctness, only how many attempts fail before the
/// resolution converges. Terminates after at most `tables.len()` rounds.
pub async fn resolve<C>(clearer: &C, tables: &[TableName]) -> Result<ResetSummary, ResetError>
where
    C: TableClearer + ?Sized,
{
    let mut pending = tables.to_vec();
    let mut summary = ResetSummary {
        rounds: 0,
        tables_cleared: 0,
        rows_deleted: 0,
    };

    while !pending.is_empty() {
        let round = run_round(clearer, &pending).await?;
        summary.rounds += 1;
        summary.tables_cleared += round.cleared.len();
        summary.rows_deleted += round.rows_deleted;

        log::debug!(
            "Reset round {}: cleared {} of {} pending tables",
            summary.rounds,
            round.cleared.len(),
            pending.len()
        );

        if round.cleared.is_empty() {
            return Err(ResetError::CircularDependency {
                rounds: summary.rounds,
                stuck: round.blocked,
            });
        }

        pending = round.blocked.into_iter().map(|(table, _)| table).collect();
    }

    Ok(summary)
}

/// Attempt every pending table once, in order.
///
/// A referential violation keeps the table pending with the error recorded;
/// any other failure aborts the resolution immediately, without attempting
/// the remaining tables.
async fn run_round<C>(clearer: &C, pending: &[TableName]) -> Result<RoundResult, ResetError>
where
    C: TableClearer + ?Sized,
{
    let mut round = RoundResult {
        cleared: Vec::new(),
        blocked: Vec::new(),
        rows_deleted: 0,
    };

    for table in pending {
        match clearer.clear(table).await {
            Ok(rows) => {
                round.rows_deleted += rows;
                round.cleared.push(table.clone());
            }
            Err(error @ ClearError::ReferentialViolation(_)) => {
                round.blocked.push((table.clone(), error));
            }
            Err(ClearError::Fatal(source)) => {
                return Err(ResetError::Fatal {
                    table: table.clone(),
                    source,
                });
            }
        }
    }

    Ok(round)
}
