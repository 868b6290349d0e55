use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ResetError;

/// Name of a table in the store.
///
/// Treated as opaque: the library never parses or derives anything from it
/// beyond quoting it as an SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Validate an explicitly configured deletion order.
///
/// The order itself is only a first-attempt hint, but the names must be
/// distinct within one reset operation.
pub fn table_set(names: Vec<TableName>) -> Result<Vec<TableName>, ResetError> {
    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.clone()) {
            return Err(ResetError::DuplicateTable(name.clone()));
        }
    }
    Ok(names)
}
