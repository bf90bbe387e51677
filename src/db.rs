//! Opening, initialising and resetting the application's SQLite database.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};
use time::OffsetDateTime;

use crate::{
    Error, budget_item::create_budget_item_table, category::create_category_table,
    transaction::create_transaction_table, user::create_user_table,
};

/// How long a connection waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The tables in the order they must be dropped so that foreign keys are
/// never left dangling.
const TABLES: [&str; 4] = ["transactions", "budget_items", "categories", "users"];

/// The current UTC time truncated to whole seconds, for `created_at` and
/// `updated_at` columns.
pub fn timestamp_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_nanosecond(0).unwrap_or(now)
}

/// Open the database file at `path` and configure the connection.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or configured.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, rusqlite::Error> {
    let connection = Connection::open(path)?;
    configure(&connection)?;

    Ok(connection)
}

/// Turn on foreign key enforcement and set the busy timeout.
///
/// SQLite does not remember these settings, so every new connection needs
/// them.
///
/// # Errors
///
/// Returns an error if the pragmas could not be set.
pub fn configure(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;
    connection.busy_timeout(BUSY_TIMEOUT)?;

    Ok(())
}

/// Create the application's tables and indexes if they do not exist.
///
/// # Errors
///
/// Returns an error if the connection could not be configured or any table
/// could not be created. No tables are created on error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    configure(connection)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_table(&transaction)?;
    create_budget_item_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Drop every application table, deleting all data.
///
/// # Errors
///
/// Returns an error if a table could not be dropped. No tables are dropped on
/// error.
pub fn reset(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    for table in TABLES {
        transaction.execute(&format!("DROP TABLE IF EXISTS {table}"), ())?;
        tracing::debug!("Dropped table {table}");
    }

    transaction.commit()?;

    Ok(())
}
