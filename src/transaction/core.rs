//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    budget_item::{BudgetItemId, BudgetPeriod, get_budget_item},
    category::get_category,
    database_id::DatabaseId,
    db::timestamp_now,
    entry_type::EntryType,
    money::Amount,
    text::validate_text,
    user::UserId,
};

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// The maximum number of characters in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that owns the transaction.
    pub user_id: UserId,
    /// The budget item the transaction counts towards, if any.
    pub budget_item_id: Option<BudgetItemId>,
    /// The amount of money spent or earned, never negative.
    pub amount: Amount,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether money was earned or spent.
    pub entry_type: EntryType,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: Amount,
        date: Date,
        description: &str,
        entry_type: EntryType,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            entry_type,
            budget_item_id: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use rust_decimal_macros::dec;
/// use time::macros::date;
///
/// let builder = Transaction::build(
///         Amount::new(dec!(85.43)),
///         date!(2025 - 01 - 05),
///         "Whole Foods",
///         EntryType::Expense,
///     )
///     .budget_item_id(Some(groceries.id));
///
/// let transaction = create_transaction(&user_id, builder, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The magnitude of the transaction. The entry type says which way the
    /// money moved, so the amount must not be negative.
    pub amount: Amount,

    /// The date when the transaction occurred.
    pub date: Date,

    /// A human-readable description of the transaction.
    ///
    /// # Examples
    /// - `"January Salary Deposit"`
    /// - `"Whole Foods"`
    pub description: String,

    /// Whether money was earned or spent.
    pub entry_type: EntryType,

    /// The budget item that the transaction counts towards.
    ///
    /// Must belong to the same user and its category must have the same
    /// entry type as the transaction.
    pub budget_item_id: Option<BudgetItemId>,
}

impl TransactionBuilder {
    /// Set the budget item for the transaction.
    pub fn budget_item_id(mut self, budget_item_id: Option<BudgetItemId>) -> Self {
        self.budget_item_id = budget_item_id;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transactions table and its indexes.
///
/// # Errors
///
/// Returns an error if the table could not be created.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            budget_item_id INTEGER REFERENCES budget_items(id) ON DELETE SET NULL,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_transactions_budget_item_id
            ON transactions(budget_item_id);",
    )?;

    Ok(())
}

/// Create a new transaction for `user_id` in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is less than zero,
/// - [Error::EmptyDescription] or [Error::TextTooLong] for an invalid description,
/// - [Error::InvalidBudgetItem] if the budget item does not belong to `user_id`,
/// - [Error::EntryTypeMismatch] if the budget item's category has a different type,
/// - [Error::UserNotFound] if `user_id` does not refer to a user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    user_id: &UserId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount.is_negative() {
        return Err(Error::NegativeAmount);
    }

    let description = validate_text(
        &builder.description,
        "Description",
        MAX_DESCRIPTION_LENGTH,
        Error::EmptyDescription,
    )?;

    if let Some(budget_item_id) = builder.budget_item_id {
        check_budget_item(budget_item_id, builder.entry_type, user_id, connection)?;
    }

    connection
        .prepare(
            "INSERT INTO transactions
                (user_id, budget_item_id, amount, description, date, type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, user_id, budget_item_id, amount, description, date, type, created_at",
        )?
        .query_row(
            (
                user_id,
                builder.budget_item_id,
                builder.amount,
                description,
                builder.date,
                builder.entry_type,
                timestamp_now(),
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Error::UserNotFound
            }
            error => error.into(),
        })
}

/// Check that the budget item belongs to the user and that its category has
/// the same entry type as the transaction.
fn check_budget_item(
    budget_item_id: BudgetItemId,
    entry_type: EntryType,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let budget_item =
        get_budget_item(budget_item_id, user_id, connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidBudgetItem,
            error => error,
        })?;

    let category = get_category(budget_item.category_id, user_id, connection)?;

    if category.entry_type != entry_type {
        return Err(Error::EntryTypeMismatch {
            transaction: entry_type,
            category: category.entry_type,
        });
    }

    Ok(())
}

/// Retrieve a transaction belonging to `user_id` by its ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to one of the user's transactions,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, user_id, budget_item_id, amount, description, date, type, created_at
            FROM transactions WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            rusqlite::named_params! {":id": id, ":user_id": user_id},
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the transactions linked to the user's budget items for `period`.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_budget_period_transactions(
    user_id: &UserId,
    period: BudgetPeriod,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.user_id, t.budget_item_id, t.amount, t.description, t.date, t.type,
                t.created_at
            FROM transactions t
            INNER JOIN budget_items b ON b.id = t.budget_item_id
            WHERE t.user_id = :user_id AND b.year = :year AND b.month = :month
            ORDER BY t.date ASC, t.id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id,
                ":year": period.year(),
                ":month": period.month_number(),
            },
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Delete one of the user's transactions.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to one of the user's transactions,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
        (id, user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the number of transactions belonging to `user_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is a SQL error.
pub fn count_transactions(user_id: &UserId, connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM transactions WHERE user_id = ?1",
            (user_id,),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Map a database row to a transaction.
///
/// Expects the columns id, user_id, budget_item_id, amount, description,
/// date, type and created_at, in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        budget_item_id: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        date: row.get(5)?,
        entry_type: row.get(6)?,
        created_at: row.get(7)?,
    })
}
