use tokio::sync::OnceCell;

use crate::config::ResetConfig;
use crate::error::ResetError;
use crate::resolver::{self, ResetSummary};
use crate::store::Store;
use crate::table::{self, TableName};

/// Resets the database to an empty state between tests.
///
/// One value is created per test suite and owns the connection plus the
/// memoized table set; call [`DatabaseReset::reset`] after each test. The
/// table *set* is resolved once and reused, but the deletion *order* is
/// rediscovered on every call, since residual test data can make different
/// tables clearable first each time.
pub struct DatabaseReset {
    store: Store,
    tables: OnceCell<Vec<TableName>>,
}

impl DatabaseReset {
    /// Connect the store named by the configuration and prepare a reset
    /// context, using the configured table list if one is present.
    pub async fn connect(config: &ResetConfig) -> Result<Self, ResetError> {
        let store = Store::connect(&config.database.dsn)
            .await
            .map_err(ResetError::Connection)?;
        Self::new(store, config.tables.clone())
    }

    /// Connect using configuration merged from `resetdb.toml` and the
    /// environment.
    pub async fn from_env() -> Result<Self, ResetError> {
        let config = ResetConfig::load()?;
        Self::connect(&config).await
    }

    /// Prepare a reset context over an already-connected store.
    ///
    /// `tables` is the explicit deletion order, used instead of catalog
    /// discovery; pass `None` to discover all user tables on first reset.
    pub fn new(store: Store, tables: Option<Vec<TableName>>) -> Result<Self, ResetError> {
        let tables = match tables {
            Some(explicit) => OnceCell::new_with(Some(table::table_set(explicit)?)),
            None => OnceCell::new(),
        };
        Ok(Self { store, tables })
    }

    /// The table set this context clears, resolved on first use.
    pub async fn tables(&self) -> Result<&[TableName], ResetError> {
        let tables = self
            .tables
            .get_or_try_init(|| async {
                let discovered = self.store.list_tables().await?;
                log::info!(
                    "Discovered {} tables to clear between tests: {}",
                    discovered.len(),
                    discovered
                        .iter()
                        .map(TableName::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Ok::<Vec<TableName>, ResetError>(discovered)
            })
            .await?;
        Ok(tables.as_slice())
    }

    /// Clear every table in the set, discovering a valid deletion order.
    ///
    /// Either every table reaches the cleared state or this fails loudly;
    /// no table is ever silently skipped.
    pub async fn reset(&self) -> Result<ResetSummary, ResetError> {
        let tables = self.tables().await?;
        resolver::resolve(&self.store, tables).await
    }
}
