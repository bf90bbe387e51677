//! Whether money is coming in or going out.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The type of a category or transaction.
///
/// Stored in the database as the text `'income'` or `'expense'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl EntryType {
    /// The text used to store the entry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// A capitalised label for displaying to users.
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            other => Err(Error::InvalidEntryType(other.to_owned())),
        }
    }
}

impl ToSql for EntryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{Error, entry_type::EntryType};

    #[test]
    fn parses_known_types() {
        assert_eq!("income".parse(), Ok(EntryType::Income));
        assert_eq!("expense".parse(), Ok(EntryType::Expense));
    }

    #[test]
    fn rejects_other_values() {
        assert_eq!(
            "savings".parse::<EntryType>(),
            Err(Error::InvalidEntryType("savings".to_owned()))
        );
        assert_eq!(
            "Income".parse::<EntryType>(),
            Err(Error::InvalidEntryType("Income".to_owned()))
        );
    }

    #[test]
    fn reading_unknown_value_from_database_fails() {
        let connection = Connection::open_in_memory().unwrap();

        let result: Result<EntryType, rusqlite::Error> =
            connection.query_row("SELECT 'debt'", [], |row| row.get(0));

        assert!(result.is_err());
    }

    #[test]
    fn deserializes_lowercase_form_values() {
        let value: EntryType = serde_json::from_str("\"expense\"").unwrap();

        assert_eq!(value, EntryType::Expense);
    }
}
